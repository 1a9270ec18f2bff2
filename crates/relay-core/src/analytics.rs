// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics event payloads and records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::IngestContext;
use crate::field;

pub const DEFAULT_EVENT: &str = "unknown";

/// Body of `POST /api/analytics`, and one element of a batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsEventPayload {
	#[serde(default, deserialize_with = "field::text")]
	pub event: Option<String>,
	#[serde(default, deserialize_with = "field::structured")]
	pub meta: Option<Value>,
	#[serde(default, deserialize_with = "field::text")]
	pub timestamp: Option<String>,
}

/// Body of `POST /api/analytics/batch`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsEventBatch {
	#[serde(default, deserialize_with = "field::batch")]
	pub events: Vec<AnalyticsEventPayload>,
}

/// A fully defaulted analytics event, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalyticsEvent {
	pub event: String,
	pub meta: Value,
	pub timestamp: String,
	pub device_id: String,
}

impl AnalyticsEventPayload {
	/// Applies field defaults and stamps the request context.
	pub fn into_record(self, ctx: &IngestContext) -> NewAnalyticsEvent {
		NewAnalyticsEvent {
			event: field::or_default(self.event, DEFAULT_EVENT),
			meta: self.meta.unwrap_or_else(|| Value::Object(Map::new())),
			timestamp: field::or_default(self.timestamp, &ctx.timestamp()),
			device_id: ctx.device_id.clone(),
		}
	}
}

impl AnalyticsEventBatch {
	pub fn len(&self) -> usize {
		self.events.len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Defaults every event in the batch against one shared context.
	pub fn into_records(self, ctx: &IngestContext) -> Vec<NewAnalyticsEvent> {
		self.events
			.into_iter()
			.map(|event| event.into_record(ctx))
			.collect()
	}
}
