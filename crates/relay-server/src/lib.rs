// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP relay for client crash reports and analytics events.
//!
//! Every write endpoint turns one JSON body into one insert call against the
//! configured [`TelemetryStore`], and every read endpoint returns the newest
//! rows. Failures are reported as `500 {"error": "..."}`.

pub mod api;
pub mod api_response;
pub mod client_info;
pub mod error;
pub mod extract;
pub mod routes;
pub mod version;

pub use api::{create_router, AppState};
pub use error::ApiError;
pub use relay_server_config::ServerConfig;
pub use relay_server_store::TelemetryStore;
