// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for payload decoding.

use thiserror::Error;

/// Errors raised while turning a request body into a typed payload.
#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("{0}")]
	Json(#[from] serde_json::Error),

	#[error("expected a JSON object, got {0}")]
	NotAnObject(&'static str),

	#[error("failed to read request body: {0}")]
	Body(String),
}

/// Result type for payload decoding.
pub type Result<T> = std::result::Result<T, PayloadError>;
