// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use relay_core::field::parse_body;
use relay_core::PayloadError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Lenient JSON body extractor.
///
/// Bodies are only parsed when sent as `application/json`. Any other body,
/// and an empty one, decodes as `{}`. Failures are reported through
/// [`ApiError`] rather than axum's own rejections.
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		if !is_json(req.headers()) {
			return Ok(Self(parse_body(b"")?));
		}

		let bytes = Bytes::from_request(req, state)
			.await
			.map_err(|e| PayloadError::Body(e.body_text()))?;
		Ok(Self(parse_body(&bytes)?))
	}
}

fn is_json(headers: &HeaderMap) -> bool {
	headers
		.get(header::CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
