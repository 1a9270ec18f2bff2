// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Telemetry relay binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relay_server::{create_router, version, AppState};
use relay_server_config::{LogFormat, LoggingConfig};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry relay - forwards client crash reports and analytics events to a store.
#[derive(Parser, Debug)]
#[command(name = "telemetry-relay", about = "Crash report and analytics relay", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/telemetry-relay/server.toml)
	#[arg(long, env = "RELAY_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| logging.level.clone().into());

	let registry = tracing_subscriber::registry().with(filter);
	match logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => relay_server_config::load_config_with_file(path)?,
		None => relay_server_config::load_config()?,
	};

	init_tracing(&config.logging);

	let store = relay_server_store::connect_store(&config.store).await?;
	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		backend = store.backend(),
		"starting telemetry-relay"
	);

	let app = create_router(AppState::new(store))
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!("listening on {}", addr);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("server shutdown complete");
	Ok(())
}
