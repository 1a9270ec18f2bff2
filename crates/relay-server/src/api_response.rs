// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON response bodies.

use serde::Serialize;

/// `{"success": true, "data": ...}` returned by single inserts and lists.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
	pub success: bool,
	pub data: T,
}

impl<T> DataResponse<T> {
	pub fn ok(data: T) -> Self {
		Self {
			success: true,
			data,
		}
	}
}

/// `{"success": true, "count": n}` returned by batch inserts.
#[derive(Debug, Serialize)]
pub struct CountResponse {
	pub success: bool,
	pub count: usize,
}

impl CountResponse {
	pub fn ok(count: usize) -> Self {
		Self {
			success: true,
			count,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub timestamp: String,
}
