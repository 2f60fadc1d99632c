// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AnySong Auth Gateway
//!
//! This crate provides the backend façade in front of the hosted identity
//! provider: sign-up, sign-in, confirmation resend, and the email
//! confirmation hand-off to the native AnySong app.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::IdentityClient;

/// Shared application state.
///
/// One `IdentityClient` is built at startup and reused read-only by every
/// in-flight request.
pub struct AppState {
    pub config: Config,
    pub identity: IdentityClient,
}
