// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the telemetry relay.
//!
//! The relay accepts two kinds of client telemetry and forwards them to an
//! external store:
//!
//! - crash reports ([`CrashReportPayload`] → [`NewCrashReport`])
//! - analytics events ([`AnalyticsEventPayload`] → [`NewAnalyticsEvent`])
//!
//! Each inbound body is first decoded into a typed payload whose fields are
//! all optional. Defaulting then turns a payload into a record in which every
//! column is populated, stamped with the device identity and receive time
//! carried by an [`IngestContext`].

pub mod analytics;
pub mod context;
pub mod crash;
pub mod error;
pub mod field;

pub use analytics::{AnalyticsEventBatch, AnalyticsEventPayload, NewAnalyticsEvent};
pub use context::{IngestContext, DEVICE_ID_HEADER, UNKNOWN_DEVICE_ID};
pub use crash::{CrashReportBatch, CrashReportPayload, NewCrashReport, ReportStatus};
pub use error::{PayloadError, Result};

/// Maximum number of rows returned by the list endpoints.
pub const LIST_LIMIT: u32 = 100;
