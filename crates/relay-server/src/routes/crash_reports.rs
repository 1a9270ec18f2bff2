// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash report handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use relay_core::{CrashReportBatch, CrashReportPayload, LIST_LIMIT};
use serde_json::Value;
use tracing::instrument;

use crate::api::AppState;
use crate::api_response::{CountResponse, DataResponse};
use crate::client_info::ingest_context;
use crate::error::ApiError;
use crate::extract::JsonPayload;

/// POST /api/crash-reports - Store one crash report.
#[instrument(skip_all, fields(device_id))]
pub async fn create_crash_report(
	State(state): State<AppState>,
	headers: HeaderMap,
	JsonPayload(payload): JsonPayload<CrashReportPayload>,
) -> Result<Json<DataResponse<Option<Value>>>, ApiError> {
	let ctx = ingest_context(&headers);
	tracing::Span::current().record("device_id", ctx.device_id.as_str());

	let record = payload.into_record(&ctx);
	let data = state.store.insert_crash_reports(&[record]).await?;

	tracing::debug!("crash report stored");
	Ok(Json(DataResponse::ok(data)))
}

/// POST /api/crash-reports/batch - Store several crash reports in one insert.
#[instrument(skip_all, fields(device_id, count))]
pub async fn create_crash_reports_batch(
	State(state): State<AppState>,
	headers: HeaderMap,
	JsonPayload(batch): JsonPayload<CrashReportBatch>,
) -> Result<Json<CountResponse>, ApiError> {
	if batch.is_empty() {
		return Ok(Json(CountResponse::ok(0)));
	}

	let ctx = ingest_context(&headers);
	let count = batch.len();
	let span = tracing::Span::current();
	span.record("device_id", ctx.device_id.as_str());
	span.record("count", count);

	let records = batch.into_records(&ctx);
	state.store.insert_crash_reports(&records).await?;

	tracing::debug!("crash report batch stored");
	Ok(Json(CountResponse::ok(count)))
}

/// GET /api/crash-reports - Newest crash reports first.
#[instrument(skip_all)]
pub async fn list_crash_reports(
	State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Value>>>, ApiError> {
	let rows = state.store.list_crash_reports(LIST_LIMIT).await?;
	Ok(Json(DataResponse::ok(rows)))
}
