// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret loading from the environment.

use std::path::PathBuf;

use relay_common_secret::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file {path} (from {var}): {source}")]
	FileRead {
		var: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Load a secret from `NAME`, or from the file named by `NAME_FILE`.
///
/// `NAME_FILE` takes precedence. File contents are trimmed of surrounding
/// whitespace. Empty values count as unset.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{name}_FILE");
	if let Some(path) = std::env::var_os(&file_var).filter(|p| !p.is_empty()) {
		let path = PathBuf::from(path);
		let content = std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
			var: file_var,
			path,
			source,
		})?;
		let trimmed = content.trim();
		return Ok((!trimmed.is_empty()).then(|| SecretString::new(trimmed.to_string())));
	}

	Ok(std::env::var(name)
		.ok()
		.filter(|v| !v.is_empty())
		.map(SecretString::new))
}
