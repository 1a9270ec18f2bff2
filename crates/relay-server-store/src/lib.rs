// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Storage backends for the telemetry relay.
//!
//! The relay writes to two append-only tables, `crash_reports` and
//! `analytics_events`, and reads them back newest first. The store owns row
//! identity and the `created_at` ordering column.
//!
//! # Backends
//!
//! - [`RestStore`] - hosted Postgres reached through its PostgREST gateway
//! - [`SqliteStore`] - local SQLite database for development and tests
//!
//! [`connect_store`] picks one from the configured URL.

pub mod error;
pub mod rest;
pub mod sqlite;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_core::{NewAnalyticsEvent, NewCrashReport};
use relay_server_config::{StoreBackend, StoreConfig};
use serde_json::Value;

pub use error::{Result, StoreError};
pub use rest::RestStore;
pub use sqlite::{create_pool, run_migrations, SqliteStore};

/// The two collections the relay writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
	CrashReports,
	AnalyticsEvents,
}

impl Table {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::CrashReports => "crash_reports",
			Self::AnalyticsEvents => "analytics_events",
		}
	}
}

impl std::fmt::Display for Table {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Append-only access to the relay's tables.
///
/// Inserts write every row in one call and return whatever acknowledgement
/// payload the store produced, which is usually nothing. Lists return rows
/// as the store reports them, newest `created_at` first.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
	/// Short backend name for logs.
	fn backend(&self) -> &'static str;

	async fn insert_crash_reports(&self, reports: &[NewCrashReport]) -> Result<Option<Value>>;
	async fn list_crash_reports(&self, limit: u32) -> Result<Vec<Value>>;

	async fn insert_analytics_events(&self, events: &[NewAnalyticsEvent])
		-> Result<Option<Value>>;
	async fn list_analytics_events(&self, limit: u32) -> Result<Vec<Value>>;
}

/// Open the store described by `config`.
#[tracing::instrument(skip(config), fields(url = %config.url))]
pub async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn TelemetryStore>> {
	match config.backend()? {
		StoreBackend::Sqlite => {
			let store = SqliteStore::connect(&config.url).await?;
			Ok(Arc::new(store))
		}
		StoreBackend::Rest => {
			let api_key = config.api_key.clone().ok_or(StoreError::MissingApiKey)?;
			let timeout = config.timeout_secs.map(Duration::from_secs);
			let store = RestStore::with_timeout(&config.url, api_key, timeout)?;
			Ok(Arc::new(store))
		}
	}
}
