// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics event handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use relay_core::{AnalyticsEventBatch, AnalyticsEventPayload, LIST_LIMIT};
use serde_json::Value;
use tracing::instrument;

use crate::api::AppState;
use crate::api_response::{CountResponse, DataResponse};
use crate::client_info::ingest_context;
use crate::error::ApiError;
use crate::extract::JsonPayload;

/// POST /api/analytics - Store one analytics event.
#[instrument(skip_all, fields(device_id))]
pub async fn create_analytics_event(
	State(state): State<AppState>,
	headers: HeaderMap,
	JsonPayload(payload): JsonPayload<AnalyticsEventPayload>,
) -> Result<Json<DataResponse<Option<Value>>>, ApiError> {
	let ctx = ingest_context(&headers);
	tracing::Span::current().record("device_id", ctx.device_id.as_str());

	let event = payload.into_record(&ctx);
	let data = state.store.insert_analytics_events(&[event]).await?;

	tracing::debug!("analytics event stored");
	Ok(Json(DataResponse::ok(data)))
}

/// POST /api/analytics/batch - Store several events in one insert.
#[instrument(skip_all, fields(device_id, count))]
pub async fn create_analytics_events_batch(
	State(state): State<AppState>,
	headers: HeaderMap,
	JsonPayload(batch): JsonPayload<AnalyticsEventBatch>,
) -> Result<Json<CountResponse>, ApiError> {
	if batch.is_empty() {
		return Ok(Json(CountResponse::ok(0)));
	}

	let ctx = ingest_context(&headers);
	let count = batch.len();
	let span = tracing::Span::current();
	span.record("device_id", ctx.device_id.as_str());
	span.record("count", count);

	let events = batch.into_records(&ctx);
	state.store.insert_analytics_events(&events).await?;

	tracing::debug!("analytics batch stored");
	Ok(Json(CountResponse::ok(count)))
}

/// GET /api/analytics - Newest events first.
#[instrument(skip_all)]
pub async fn list_analytics_events(
	State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Value>>>, ApiError> {
	let rows = state.store.list_analytics_events(LIST_LIMIT).await?;
	Ok(Json(DataResponse::ok(rows)))
}
