// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for store operations.

use relay_server_config::ConfigError;
use thiserror::Error;

/// Errors that can occur while talking to a store.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error(transparent)]
	Database(#[from] sqlx::Error),

	#[error(transparent)]
	Network(#[from] reqwest::Error),

	#[error("request to store timed out")]
	Timeout,

	/// The hosted store rejected the request. `message` is the store's own
	/// error text and is surfaced to callers verbatim.
	#[error("{message}")]
	Api { status: u16, message: String },

	#[error("invalid response from store: {0}")]
	InvalidResponse(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("store configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("store API key is not configured")]
	MissingApiKey,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
