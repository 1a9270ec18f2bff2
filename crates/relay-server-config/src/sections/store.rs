// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Data store configuration.

use relay_common_secret::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_URL: &str = "sqlite:./telemetry-relay.db";

/// Which store implementation a URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
	/// Local SQLite database (`sqlite:` URLs).
	Sqlite,
	/// Hosted Postgres behind a PostgREST gateway (`http://` or `https://` URLs).
	Rest,
}

/// Data store configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct StoreConfig {
	pub url: String,
	pub api_key: Option<SecretString>,
	/// Per-request timeout for the hosted store. `None` leaves it to the client default.
	pub timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_URL.to_string(),
			api_key: None,
			timeout_secs: None,
		}
	}
}

impl StoreConfig {
	/// Determine the backend from the URL scheme.
	pub fn backend(&self) -> Result<StoreBackend, ConfigError> {
		let scheme = self
			.url
			.split_once(':')
			.map(|(scheme, _)| scheme.to_ascii_lowercase())
			.unwrap_or_default();

		match scheme.as_str() {
			"sqlite" => Ok(StoreBackend::Sqlite),
			"http" | "https" => Ok(StoreBackend::Rest),
			_ => Err(ConfigError::InvalidValue {
				key: "store.url".to_string(),
				message: format!("unsupported store URL '{}'", self.url),
			}),
		}
	}
}

/// Data store configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub api_key: Option<SecretString>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl StoreConfigLayer {
	pub fn merge(&mut self, other: StoreConfigLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> StoreConfig {
		StoreConfig {
			url: self.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
			api_key: self.api_key,
			timeout_secs: self.timeout_secs,
		}
	}
}
