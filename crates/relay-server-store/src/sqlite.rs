// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite backend for local development and tests.

use std::str::FromStr;

use async_trait::async_trait;
use relay_core::{NewAnalyticsEvent, NewCrashReport};
use serde::Serialize;
use serde_json::Value;
use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::instrument;

use crate::error::{Result, StoreError};
use crate::TelemetryStore;

const CREATE_CRASH_REPORTS: &str = r#"
	CREATE TABLE IF NOT EXISTS crash_reports (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		message TEXT NOT NULL,
		stack TEXT NOT NULL,
		userAgent TEXT NOT NULL,
		timestamp TEXT NOT NULL,
		url TEXT NOT NULL,
		device_id TEXT NOT NULL,
		status TEXT NOT NULL,
		created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
	)
"#;

const CREATE_ANALYTICS_EVENTS: &str = r#"
	CREATE TABLE IF NOT EXISTS analytics_events (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		event TEXT NOT NULL,
		meta TEXT NOT NULL,
		timestamp TEXT NOT NULL,
		device_id TEXT NOT NULL,
		created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
	)
"#;

fn is_in_memory(database_url: &str) -> bool {
	database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create a SqlitePool with WAL mode and common settings.
///
/// In-memory databases get a single connection that is never recycled, since
/// each new connection would otherwise see its own empty database.
#[instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

	let pool = if is_in_memory(database_url) {
		SqlitePoolOptions::new()
			.max_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect_with(options)
			.await?
	} else {
		let options = options
			.journal_mode(SqliteJournalMode::Wal)
			.synchronous(SqliteSynchronous::Normal);
		SqlitePool::connect_with(options).await?
	};

	tracing::debug!("database pool created");
	Ok(pool)
}

/// Creates the relay's tables if they do not exist yet.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
	sqlx::query(CREATE_CRASH_REPORTS).execute(pool).await?;
	sqlx::query(CREATE_ANALYTICS_EVENTS).execute(pool).await?;
	tracing::debug!("store tables ready");
	Ok(())
}

/// SQLite implementation of [`TelemetryStore`].
#[derive(Clone)]
pub struct SqliteStore {
	pool: SqlitePool,
}

impl SqliteStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Opens `database_url` and ensures the tables exist.
	pub async fn connect(database_url: &str) -> Result<Self> {
		let pool = create_pool(database_url).await?;
		run_migrations(&pool).await?;
		Ok(Self::new(pool))
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}
}

#[async_trait]
impl TelemetryStore for SqliteStore {
	fn backend(&self) -> &'static str {
		"sqlite"
	}

	#[instrument(skip(self, reports), fields(rows = reports.len()))]
	async fn insert_crash_reports(&self, reports: &[NewCrashReport]) -> Result<Option<Value>> {
		let mut tx = self.pool.begin().await?;
		for report in reports {
			sqlx::query(
				r#"
				INSERT INTO crash_reports (
					message, stack, userAgent, timestamp, url, device_id, status
				)
				VALUES (?, ?, ?, ?, ?, ?, ?)
				"#,
			)
			.bind(&report.message)
			.bind(&report.stack)
			.bind(&report.user_agent)
			.bind(&report.timestamp)
			.bind(&report.url)
			.bind(&report.device_id)
			.bind(report.status.as_str())
			.execute(&mut *tx)
			.await?;
		}
		tx.commit().await?;

		Ok(None)
	}

	#[instrument(skip(self))]
	async fn list_crash_reports(&self, limit: u32) -> Result<Vec<Value>> {
		let rows = sqlx::query_as::<_, CrashReportRow>(
			r#"
			SELECT id, message, stack, userAgent, timestamp, url, device_id, status, created_at
			FROM crash_reports
			ORDER BY created_at DESC, id DESC
			LIMIT ?
			"#,
		)
		.bind(i64::from(limit))
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter()
			.map(|row| serde_json::to_value(row).map_err(StoreError::from))
			.collect()
	}

	#[instrument(skip(self, events), fields(rows = events.len()))]
	async fn insert_analytics_events(
		&self,
		events: &[NewAnalyticsEvent],
	) -> Result<Option<Value>> {
		let mut tx = self.pool.begin().await?;
		for event in events {
			let meta_json = serde_json::to_string(&event.meta)?;
			sqlx::query(
				r#"
				INSERT INTO analytics_events (event, meta, timestamp, device_id)
				VALUES (?, ?, ?, ?)
				"#,
			)
			.bind(&event.event)
			.bind(meta_json)
			.bind(&event.timestamp)
			.bind(&event.device_id)
			.execute(&mut *tx)
			.await?;
		}
		tx.commit().await?;

		Ok(None)
	}

	#[instrument(skip(self))]
	async fn list_analytics_events(&self, limit: u32) -> Result<Vec<Value>> {
		let rows = sqlx::query_as::<_, AnalyticsEventRow>(
			r#"
			SELECT id, event, meta, timestamp, device_id, created_at
			FROM analytics_events
			ORDER BY created_at DESC, id DESC
			LIMIT ?
			"#,
		)
		.bind(i64::from(limit))
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(AnalyticsEventRow::into_json).collect()
	}
}

#[derive(sqlx::FromRow, Serialize)]
struct CrashReportRow {
	id: i64,
	message: String,
	stack: String,
	#[sqlx(rename = "userAgent")]
	#[serde(rename = "userAgent")]
	user_agent: String,
	timestamp: String,
	url: String,
	device_id: String,
	status: String,
	created_at: String,
}

#[derive(sqlx::FromRow)]
struct AnalyticsEventRow {
	id: i64,
	event: String,
	meta: String,
	timestamp: String,
	device_id: String,
	created_at: String,
}

impl AnalyticsEventRow {
	fn into_json(self) -> Result<Value> {
		let meta: Value = serde_json::from_str(&self.meta)?;
		Ok(serde_json::json!({
			"id": self.id,
			"event": self.event,
			"meta": meta,
			"timestamp": self.timestamp,
			"device_id": self.device_id,
			"created_at": self.created_at,
		}))
	}
}
