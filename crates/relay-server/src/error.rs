// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::PayloadError;
use relay_server_store::StoreError;

use crate::api_response::ErrorResponse;

/// Any failure inside an endpoint. Client and server faults are not
/// distinguished: every variant renders as `500 {"error": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error(transparent)]
	Payload(#[from] PayloadError),
	#[error(transparent)]
	Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let message = self.to_string();
		match &self {
			ApiError::Payload(e) => tracing::error!(error = %e, "failed to decode request body"),
			ApiError::Store(e) => tracing::error!(error = %e, "store call failed"),
		}

		(
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(ErrorResponse { error: message }),
		)
			.into_response()
	}
}
