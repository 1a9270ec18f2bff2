// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lenient field decoders shared by the request payloads.
//!
//! Clients are not trusted to send well-typed JSON. A field that is missing,
//! `null`, `false`, `0` or `""` is treated as absent and later replaced by its
//! default. Any other value is accepted: text fields keep strings as-is and
//! take the JSON rendering of everything else.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// Returns true when `value` counts as absent.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

/// Decodes an optional text field.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		v if is_blank(&v) => None,
		Value::String(s) => Some(s),
		other => Some(other.to_string()),
	})
}

/// Returns `value` unless it is missing or empty, otherwise `default`.
pub fn or_default(value: Option<String>, default: &str) -> String {
	value
		.filter(|v| !v.is_empty())
		.unwrap_or_else(|| default.to_string())
}

/// Decodes an optional structured field, kept as raw JSON.
pub fn structured<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok((!is_blank(&value)).then_some(value))
}

/// Decodes a batch list.
///
/// Anything other than an array yields an empty batch. Inside an array,
/// objects are decoded as-is and other non-null values carry no fields, so
/// they decode as `{}`. A `null` element is an error.
pub fn batch<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	match Value::deserialize(deserializer)? {
		Value::Array(items) => items
			.into_iter()
			.enumerate()
			.map(|(index, item)| {
				let object = match item {
					Value::Null => {
						return Err(D::Error::custom(format!("batch item {index} is null")));
					}
					Value::Object(map) => map,
					_ => Map::new(),
				};
				serde_json::from_value(Value::Object(object))
					.map_err(|e| D::Error::custom(format!("batch item {index}: {e}")))
			})
			.collect(),
		_ => Ok(Vec::new()),
	}
}

/// Parses a request body into a payload.
///
/// An empty body, or a top-level array, decodes as `{}` so that every field
/// takes its default. Top-level scalars are rejected.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> crate::Result<T> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(serde_json::from_value(Value::Object(Map::new()))?);
	}

	let object = match serde_json::from_slice::<Value>(bytes)? {
		Value::Object(map) => map,
		Value::Array(_) => Map::new(),
		other => return Err(PayloadError::NotAnObject(kind(&other))),
	};
	Ok(serde_json::from_value(Value::Object(object))?)
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
