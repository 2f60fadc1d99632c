// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AnySong Auth Gateway server
//!
//! Thin HTTP façade over the hosted identity provider. All credential
//! handling happens upstream; this process only marshals requests and
//! serves the email-confirmation hand-off page.

use anysong_auth::{config::Config, services::IdentityClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting AnySong Auth Gateway");

    // Single provider client, shared read-only across all requests
    let identity = IdentityClient::new(&config.supabase_url, &config.supabase_api_key);
    tracing::info!(provider_url = %config.supabase_url, "Identity provider client initialized");

    let state = Arc::new(AppState { config: config.clone(), identity });

    let app = anysong_auth::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("anysong_auth=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
