// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{Method, Request, StatusCode},
	Router,
};
use relay_core::{NewAnalyticsEvent, NewCrashReport};
use relay_server::{create_router, AppState};
use relay_server_store::{Result, StoreError, TelemetryStore};
use serde_json::Value;
use tower::ServiceExt;

/// Store that records every call and answers from canned rows.
#[derive(Default)]
pub struct RecordingStore {
	pub crash_inserts: Mutex<Vec<Vec<NewCrashReport>>>,
	pub event_inserts: Mutex<Vec<Vec<NewAnalyticsEvent>>>,
	pub list_limits: Mutex<Vec<u32>>,
	pub rows: Vec<Value>,
	pub insert_ack: Option<Value>,
}

impl RecordingStore {
	pub fn with_rows(rows: Vec<Value>) -> Self {
		Self {
			rows,
			..Default::default()
		}
	}

	pub fn crash_inserts(&self) -> Vec<Vec<NewCrashReport>> {
		self.crash_inserts.lock().unwrap().clone()
	}

	pub fn event_inserts(&self) -> Vec<Vec<NewAnalyticsEvent>> {
		self.event_inserts.lock().unwrap().clone()
	}

	pub fn list_limits(&self) -> Vec<u32> {
		self.list_limits.lock().unwrap().clone()
	}

	pub fn total_calls(&self) -> usize {
		self.crash_inserts.lock().unwrap().len()
			+ self.event_inserts.lock().unwrap().len()
			+ self.list_limits.lock().unwrap().len()
	}
}

#[async_trait]
impl TelemetryStore for RecordingStore {
	fn backend(&self) -> &'static str {
		"recording"
	}

	async fn insert_crash_reports(&self, reports: &[NewCrashReport]) -> Result<Option<Value>> {
		self.crash_inserts.lock().unwrap().push(reports.to_vec());
		Ok(self.insert_ack.clone())
	}

	async fn list_crash_reports(&self, limit: u32) -> Result<Vec<Value>> {
		self.list_limits.lock().unwrap().push(limit);
		Ok(self.rows.clone())
	}

	async fn insert_analytics_events(&self, events: &[NewAnalyticsEvent]) -> Result<Option<Value>> {
		self.event_inserts.lock().unwrap().push(events.to_vec());
		Ok(self.insert_ack.clone())
	}

	async fn list_analytics_events(&self, limit: u32) -> Result<Vec<Value>> {
		self.list_limits.lock().unwrap().push(limit);
		Ok(self.rows.clone())
	}
}

pub const STORE_FAILURE: &str = "permission denied for table crash_reports";

/// Store whose every call fails with the same message, counting attempts.
#[derive(Default)]
pub struct FailingStore {
	pub calls: Mutex<usize>,
}

impl FailingStore {
	fn fail<T>(&self) -> Result<T> {
		*self.calls.lock().unwrap() += 1;
		Err(StoreError::Api {
			status: 401,
			message: STORE_FAILURE.to_string(),
		})
	}

	pub fn calls(&self) -> usize {
		*self.calls.lock().unwrap()
	}
}

#[async_trait]
impl TelemetryStore for FailingStore {
	fn backend(&self) -> &'static str {
		"failing"
	}

	async fn insert_crash_reports(&self, _reports: &[NewCrashReport]) -> Result<Option<Value>> {
		self.fail()
	}

	async fn list_crash_reports(&self, _limit: u32) -> Result<Vec<Value>> {
		self.fail()
	}

	async fn insert_analytics_events(&self, _events: &[NewAnalyticsEvent]) -> Result<Option<Value>> {
		self.fail()
	}

	async fn list_analytics_events(&self, _limit: u32) -> Result<Vec<Value>> {
		self.fail()
	}
}

pub fn app_with(store: Arc<dyn TelemetryStore>) -> Router {
	create_router(AppState::new(store))
}

pub async fn post_raw(
	app: Router,
	uri: &str,
	body: impl Into<Body>,
	device_id: Option<&str>,
) -> (StatusCode, Value) {
	post_with_content_type(app, uri, "application/json", body, device_id).await
}

pub async fn post_with_content_type(
	app: Router,
	uri: &str,
	content_type: &str,
	body: impl Into<Body>,
	device_id: Option<&str>,
) -> (StatusCode, Value) {
	let mut builder = Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", content_type);
	if let Some(id) = device_id {
		builder = builder.header("x-device-id", id);
	}

	send(app, builder.body(body.into()).unwrap()).await
}

pub async fn post_json(
	app: Router,
	uri: &str,
	body: Value,
	device_id: Option<&str>,
) -> (StatusCode, Value) {
	post_raw(app, uri, body.to_string(), device_id).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
	let request = Request::builder()
		.method(Method::GET)
		.uri(uri)
		.body(Body::empty())
		.unwrap();
	send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json = serde_json::from_slice(&body).unwrap();
	(status, json)
}
