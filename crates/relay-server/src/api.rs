// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router construction and shared handler state.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use relay_server_store::TelemetryStore;

use crate::routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub store: Arc<dyn TelemetryStore>,
}

impl AppState {
	pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
		Self { store }
	}
}

/// Builds the relay's routes. Middleware such as CORS and tracing is layered
/// on by the binary.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/crash-reports",
			get(routes::crash_reports::list_crash_reports)
				.post(routes::crash_reports::create_crash_report),
		)
		.route(
			"/api/crash-reports/batch",
			axum::routing::post(routes::crash_reports::create_crash_reports_batch),
		)
		.route(
			"/api/analytics",
			get(routes::analytics::list_analytics_events)
				.post(routes::analytics::create_analytics_event),
		)
		.route(
			"/api/analytics/batch",
			axum::routing::post(routes::analytics::create_analytics_events_batch),
		)
		.with_state(state)
}
