// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Liveness handler.

use axum::Json;
use chrono::Utc;
use relay_core::context::format_timestamp;

use crate::api_response::HealthResponse;

/// GET /health - Reports that the process is up. Never touches the store.
pub async fn health_check() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		timestamp: format_timestamp(Utc::now()),
	})
}
