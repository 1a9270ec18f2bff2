// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hosted store client speaking the PostgREST protocol.

use std::time::Duration;

use async_trait::async_trait;
use relay_common_secret::SecretString;
use relay_core::{NewAnalyticsEvent, NewCrashReport};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument, trace};

use crate::error::{Result, StoreError};
use crate::{Table, TelemetryStore};

const REST_PATH: &str = "rest/v1";

/// Error body returned by PostgREST on failure.
#[derive(Debug, Deserialize)]
struct PostgrestError {
	message: Option<String>,
}

/// Client for a hosted Postgres database exposed through PostgREST.
///
/// Requests authenticate with the project API key, sent both as the
/// `apikey` header and as a bearer token.
#[derive(Debug, Clone)]
pub struct RestStore {
	http_client: Client,
	base_url: String,
	api_key: SecretString,
}

impl RestStore {
	/// Creates a client without a request timeout.
	pub fn new(base_url: impl AsRef<str>, api_key: SecretString) -> Result<Self> {
		Self::with_timeout(base_url, api_key, None)
	}

	/// Creates a client, optionally bounding every request by `timeout`.
	pub fn with_timeout(
		base_url: impl AsRef<str>,
		api_key: SecretString,
		timeout: Option<Duration>,
	) -> Result<Self> {
		let mut builder = Client::builder().user_agent(user_agent());
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self {
			http_client: builder.build()?,
			base_url: base_url.as_ref().trim_end_matches('/').to_string(),
			api_key,
		})
	}

	fn table_url(&self, table: Table) -> String {
		format!("{}/{REST_PATH}/{}", self.base_url, table.as_str())
	}

	fn request(&self, method: Method, table: Table) -> RequestBuilder {
		let key = self.api_key.expose();
		self.http_client
			.request(method, self.table_url(table))
			.header("apikey", key)
			.bearer_auth(key)
	}

	#[instrument(skip(self, rows), fields(table = %table, rows = rows.len()))]
	async fn insert<T: Serialize + Sync>(&self, table: Table, rows: &[T]) -> Result<Option<Value>> {
		debug!("inserting rows into hosted store");

		let response = self
			.request(Method::POST, table)
			.header("Prefer", "return=minimal")
			.json(rows)
			.send()
			.await
			.map_err(send_error)?;

		let body = read_success_body(response).await?;
		if body.trim().is_empty() {
			return Ok(None);
		}

		trace!(body = %body, "insert acknowledgement");
		serde_json::from_str(&body)
			.map(Some)
			.map_err(|e| StoreError::InvalidResponse(format!("JSON parse error: {e}")))
	}

	#[instrument(skip(self), fields(table = %table))]
	async fn select_recent(&self, table: Table, limit: u32) -> Result<Vec<Value>> {
		let response = self
			.request(Method::GET, table)
			.query(&[
				("select", "*".to_string()),
				("order", "created_at.desc".to_string()),
				("limit", limit.to_string()),
			])
			.send()
			.await
			.map_err(send_error)?;

		let body = read_success_body(response).await?;
		let rows: Vec<Value> = serde_json::from_str(&body)
			.map_err(|e| StoreError::InvalidResponse(format!("JSON parse error: {e}")))?;

		debug!(row_count = rows.len(), "fetched rows from hosted store");
		Ok(rows)
	}
}

#[async_trait]
impl TelemetryStore for RestStore {
	fn backend(&self) -> &'static str {
		"postgrest"
	}

	async fn insert_crash_reports(&self, reports: &[NewCrashReport]) -> Result<Option<Value>> {
		self.insert(Table::CrashReports, reports).await
	}

	async fn list_crash_reports(&self, limit: u32) -> Result<Vec<Value>> {
		self.select_recent(Table::CrashReports, limit).await
	}

	async fn insert_analytics_events(
		&self,
		events: &[NewAnalyticsEvent],
	) -> Result<Option<Value>> {
		self.insert(Table::AnalyticsEvents, events).await
	}

	async fn list_analytics_events(&self, limit: u32) -> Result<Vec<Value>> {
		self.select_recent(Table::AnalyticsEvents, limit).await
	}
}

fn user_agent() -> String {
	format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn send_error(e: reqwest::Error) -> StoreError {
	if e.is_timeout() {
		error!("request to hosted store timed out");
		return StoreError::Timeout;
	}
	error!(error = %e, "network error talking to hosted store");
	StoreError::Network(e)
}

/// Returns the body of a successful response, or the store's error.
async fn read_success_body(response: Response) -> Result<String> {
	let status = response.status();
	debug!(status = %status, "received response from hosted store");

	let body = response.text().await.map_err(|e| {
		error!(error = %e, "failed to read store response body");
		StoreError::Network(e)
	})?;

	if status.is_success() {
		return Ok(body);
	}

	let message = serde_json::from_str::<PostgrestError>(&body)
		.ok()
		.and_then(|e| e.message)
		.or_else(|| (!body.trim().is_empty()).then(|| body.clone()))
		.unwrap_or_else(|| {
			status
				.canonical_reason()
				.unwrap_or("store request failed")
				.to_string()
		});

	error!(status = status.as_u16(), message = %message, "hosted store returned an error");
	Err(StoreError::Api {
		status: status.as_u16(),
		message,
	})
}
