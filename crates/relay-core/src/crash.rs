// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash report payloads and records.

use serde::{Deserialize, Serialize};

use crate::context::IngestContext;
use crate::field;

pub const DEFAULT_MESSAGE: &str = "Unknown error";
pub const DEFAULT_STACK: &str = "unknown";

/// Lifecycle status of a stored crash report.
///
/// The relay only ever creates reports; triage happens elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
	#[default]
	New,
}

impl ReportStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::New => "new",
		}
	}
}

/// Body of `POST /api/crash-reports`, and one element of a batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrashReportPayload {
	#[serde(default, deserialize_with = "field::text")]
	pub message: Option<String>,
	#[serde(default, deserialize_with = "field::text")]
	pub stack: Option<String>,
	#[serde(default, rename = "userAgent", deserialize_with = "field::text")]
	pub user_agent: Option<String>,
	#[serde(default, deserialize_with = "field::text")]
	pub timestamp: Option<String>,
	#[serde(default, deserialize_with = "field::text")]
	pub url: Option<String>,
}

/// Body of `POST /api/crash-reports/batch`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrashReportBatch {
	#[serde(default, deserialize_with = "field::batch")]
	pub reports: Vec<CrashReportPayload>,
}

/// A fully defaulted crash report, ready to be written to the store.
///
/// Field names match the `crash_reports` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCrashReport {
	pub message: String,
	pub stack: String,
	#[serde(rename = "userAgent")]
	pub user_agent: String,
	pub timestamp: String,
	pub url: String,
	pub device_id: String,
	pub status: ReportStatus,
}

impl CrashReportPayload {
	/// Applies field defaults and stamps the request context.
	pub fn into_record(self, ctx: &IngestContext) -> NewCrashReport {
		NewCrashReport {
			message: field::or_default(self.message, DEFAULT_MESSAGE),
			stack: field::or_default(self.stack, DEFAULT_STACK),
			user_agent: self.user_agent.unwrap_or_default(),
			timestamp: field::or_default(self.timestamp, &ctx.timestamp()),
			url: self.url.unwrap_or_default(),
			device_id: ctx.device_id.clone(),
			status: ReportStatus::New,
		}
	}
}

impl CrashReportBatch {
	pub fn len(&self) -> usize {
		self.reports.len()
	}

	pub fn is_empty(&self) -> bool {
		self.reports.is_empty()
	}

	/// Defaults every report in the batch against one shared context.
	pub fn into_records(self, ctx: &IngestContext) -> Vec<NewCrashReport> {
		self.reports
			.into_iter()
			.map(|report| report.into_record(ctx))
			.collect()
	}
}
