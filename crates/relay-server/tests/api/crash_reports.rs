// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use relay_core::{ReportStatus, LIST_LIMIT};
use serde_json::json;

use super::support::{
	app_with, get_json, post_json, post_raw, post_with_content_type, FailingStore,
	RecordingStore, STORE_FAILURE,
};

#[tokio::test]
async fn create_with_no_fields_persists_defaults() {
	let store = Arc::new(RecordingStore::default());
	let before = Utc::now();

	let (status, body) = post_json(app_with(store.clone()), "/api/crash-reports", json!({}), None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "success": true, "data": null }));

	let inserts = store.crash_inserts();
	assert_eq!(inserts.len(), 1);
	assert_eq!(inserts[0].len(), 1);
	let report = &inserts[0][0];
	assert_eq!(report.message, "Unknown error");
	assert_eq!(report.stack, "unknown");
	assert_eq!(report.user_agent, "");
	assert_eq!(report.url, "");
	assert_eq!(report.device_id, "unknown");
	assert_eq!(report.status, ReportStatus::New);

	let stamped = DateTime::parse_from_rfc3339(&report.timestamp)
		.unwrap()
		.with_timezone(&Utc);
	assert!(stamped >= before - chrono::Duration::milliseconds(1));
	assert!(stamped <= Utc::now());
}

#[tokio::test]
async fn create_keeps_message_and_uses_device_header() {
	let store = Arc::new(RecordingStore::default());

	let (status, _) = post_json(
		app_with(store.clone()),
		"/api/crash-reports",
		json!({ "message": "TypeError: x is undefined" }),
		Some("abc123"),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	let report = &store.crash_inserts()[0][0];
	assert_eq!(report.message, "TypeError: x is undefined");
	assert_eq!(report.stack, "unknown");
	assert_eq!(report.device_id, "abc123");
	assert_eq!(report.status, ReportStatus::New);
}

#[tokio::test]
async fn create_passes_client_fields_through() {
	let store = Arc::new(RecordingStore::default());

	post_json(
		app_with(store.clone()),
		"/api/crash-reports",
		json!({
			"message": "boom",
			"stack": "at main (app.js:1:1)",
			"userAgent": "Mozilla/5.0",
			"timestamp": "2024-12-31T23:59:59.999Z",
			"url": "https://app.example.com/settings",
			"status": "resolved",
			"device_id": "spoofed"
		}),
		Some("dev-7"),
	)
	.await;

	let report = &store.crash_inserts()[0][0];
	assert_eq!(report.stack, "at main (app.js:1:1)");
	assert_eq!(report.user_agent, "Mozilla/5.0");
	assert_eq!(report.timestamp, "2024-12-31T23:59:59.999Z");
	assert_eq!(report.url, "https://app.example.com/settings");
	assert_eq!(report.status, ReportStatus::New);
	assert_eq!(report.device_id, "dev-7");
}

#[tokio::test]
async fn create_treats_blank_values_as_missing() {
	let store = Arc::new(RecordingStore::default());

	post_json(
		app_with(store.clone()),
		"/api/crash-reports",
		json!({ "message": "", "stack": null, "url": false, "userAgent": 0 }),
		None,
	)
	.await;

	let report = &store.crash_inserts()[0][0];
	assert_eq!(report.message, "Unknown error");
	assert_eq!(report.stack, "unknown");
	assert_eq!(report.url, "");
	assert_eq!(report.user_agent, "");
}

#[tokio::test]
async fn create_accepts_empty_body() {
	let store = Arc::new(RecordingStore::default());

	let (status, _) = post_raw(app_with(store.clone()), "/api/crash-reports", "", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(store.crash_inserts()[0][0].message, "Unknown error");
}

#[tokio::test]
async fn create_returns_store_acknowledgement() {
	let store = Arc::new(RecordingStore {
		insert_ack: Some(json!([{ "id": 1 }])),
		..Default::default()
	});

	let (_, body) = post_json(app_with(store), "/api/crash-reports", json!({}), None).await;
	assert_eq!(body, json!({ "success": true, "data": [{ "id": 1 }] }));
}

#[tokio::test]
async fn create_with_malformed_json_is_500() {
	let store = Arc::new(RecordingStore::default());

	let (status, body) = post_raw(app_with(store.clone()), "/api/crash-reports", "{oops", None).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(body["error"].is_string());
	assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn create_with_scalar_body_is_500() {
	for body in ["42", "null", "\"TypeError\""] {
		let store = Arc::new(RecordingStore::default());

		let (status, response) =
			post_raw(app_with(store.clone()), "/api/crash-reports", body, None).await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {body}");
		assert!(response["error"].as_str().unwrap().starts_with("expected a JSON object"));
		assert_eq!(store.total_calls(), 0);
	}
}

#[tokio::test]
async fn create_ignores_body_without_json_content_type() {
	let store = Arc::new(RecordingStore::default());

	let (status, _) = post_with_content_type(
		app_with(store.clone()),
		"/api/crash-reports",
		"text/plain",
		r#"{"message":"x"}"#,
		Some("abc123"),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	let report = &store.crash_inserts()[0][0];
	assert_eq!(report.message, "Unknown error");
	assert_eq!(report.device_id, "abc123");
}

#[tokio::test]
async fn create_accepts_form_encoded_body_as_empty() {
	let store = Arc::new(RecordingStore::default());

	let (status, body) = post_with_content_type(
		app_with(store.clone()),
		"/api/crash-reports",
		"application/x-www-form-urlencoded",
		"message=x",
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], true);
	assert_eq!(store.crash_inserts()[0][0].message, "Unknown error");
}

#[tokio::test]
async fn create_store_failure_is_500_with_message() {
	let store = Arc::new(FailingStore::default());

	let (status, body) = post_json(app_with(store.clone()), "/api/crash-reports", json!({}), None).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": STORE_FAILURE }));
	assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn batch_without_reports_writes_nothing() {
	for body in [json!({}), json!({ "reports": null }), json!({ "reports": [] })] {
		let store = Arc::new(RecordingStore::default());

		let (status, response) =
			post_json(app_with(store.clone()), "/api/crash-reports/batch", body, None).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(response, json!({ "success": true, "count": 0 }));
		assert_eq!(store.total_calls(), 0);
	}
}

#[tokio::test]
async fn batch_with_non_array_reports_writes_nothing() {
	let store = Arc::new(RecordingStore::default());

	let (status, response) = post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": { "message": "not a list" } }),
		None,
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(response["count"], 0);
	assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn batch_is_one_insert_with_shared_device_id() {
	let store = Arc::new(RecordingStore::default());

	let (status, response) = post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": [
			{ "message": "first" },
			{},
			{ "message": "third", "stack": "s" }
		] }),
		Some("dev-1"),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(response, json!({ "success": true, "count": 3 }));

	let inserts = store.crash_inserts();
	assert_eq!(inserts.len(), 1);
	let rows = &inserts[0];
	assert_eq!(rows.len(), 3);
	assert!(rows.iter().all(|r| r.device_id == "dev-1"));
	assert!(rows.iter().all(|r| r.status == ReportStatus::New));
	assert_eq!(rows[0].message, "first");
	assert_eq!(rows[1].message, "Unknown error");
	assert_eq!(rows[2].stack, "s");
}

#[tokio::test]
async fn batch_scalar_items_become_default_reports() {
	let store = Arc::new(RecordingStore::default());

	let (status, response) = post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": [42, "x", {}] }),
		Some("dev-1"),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(response, json!({ "success": true, "count": 3 }));

	let inserts = store.crash_inserts();
	assert_eq!(inserts.len(), 1);
	assert_eq!(inserts[0].len(), 3);
	for report in &inserts[0] {
		assert_eq!(report.message, "Unknown error");
		assert_eq!(report.stack, "unknown");
		assert_eq!(report.user_agent, "");
		assert_eq!(report.url, "");
		assert_eq!(report.device_id, "dev-1");
		assert_eq!(report.status, ReportStatus::New);
	}
}

#[tokio::test]
async fn batch_with_null_report_is_500() {
	let store = Arc::new(RecordingStore::default());

	let (status, body) = post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": [{}, null] }),
		None,
	)
	.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(body["error"].as_str().unwrap().contains("batch item 1 is null"));
	assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn batch_without_device_header_is_unknown() {
	let store = Arc::new(RecordingStore::default());

	post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": [{}, {}] }),
		None,
	)
	.await;

	assert!(store.crash_inserts()[0].iter().all(|r| r.device_id == "unknown"));
}

#[tokio::test]
async fn batch_store_failure_is_500() {
	let store = Arc::new(FailingStore::default());

	let (status, body) = post_json(
		app_with(store.clone()),
		"/api/crash-reports/batch",
		json!({ "reports": [{}] }),
		None,
	)
	.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"], STORE_FAILURE);
	assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn list_returns_store_rows_with_limit() {
	let rows = vec![json!({ "id": 2 }), json!({ "id": 1 })];
	let store = Arc::new(RecordingStore::with_rows(rows.clone()));

	let (status, body) = get_json(app_with(store.clone()), "/api/crash-reports").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "success": true, "data": rows }));
	assert_eq!(store.list_limits(), vec![LIST_LIMIT]);
}

#[tokio::test]
async fn list_store_failure_is_500() {
	let store = Arc::new(FailingStore::default());

	let (status, body) = get_json(app_with(store), "/api/crash-reports").await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({ "error": STORE_FAILURE }));
}
