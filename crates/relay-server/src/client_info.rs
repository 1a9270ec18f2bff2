// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::HeaderMap;
use relay_core::{IngestContext, DEVICE_ID_HEADER};

/// Reads the caller's device identifier, if it sent a readable one.
pub fn device_id(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(DEVICE_ID_HEADER)
		.and_then(|v| v.to_str().ok())
}

/// Captures the device identity and receive time for one request.
pub fn ingest_context(headers: &HeaderMap) -> IngestContext {
	IngestContext::new(device_id(headers))
}
