// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-request ingest context.

use chrono::{DateTime, SecondsFormat, Utc};

/// Header carrying the caller's device identifier.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Device identifier used when the header is missing or empty.
pub const UNKNOWN_DEVICE_ID: &str = "unknown";

/// Values stamped onto every record created by one request.
///
/// A batch shares a single context, so all of its rows carry the same
/// `device_id` and the same default timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestContext {
	pub device_id: String,
	pub received_at: DateTime<Utc>,
}

impl IngestContext {
	/// Creates a context stamped with the current time.
	pub fn new(device_id: Option<&str>) -> Self {
		Self::at(device_id, Utc::now())
	}

	/// Creates a context with an explicit receive time.
	pub fn at(device_id: Option<&str>, received_at: DateTime<Utc>) -> Self {
		let device_id = device_id
			.filter(|id| !id.is_empty())
			.unwrap_or(UNKNOWN_DEVICE_ID)
			.to_string();
		Self {
			device_id,
			received_at,
		}
	}

	/// The receive time as an ISO-8601 string with millisecond precision.
	pub fn timestamp(&self) -> String {
		format_timestamp(self.received_at)
	}
}

/// Formats a time the way clients format theirs (`2025-01-01T12:00:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
	at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
