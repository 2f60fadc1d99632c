// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth gateway routes: sign-up, sign-in, confirmation resend.
//!
//! These are pass-through calls to the identity provider. The one piece of
//! policy enforced here is the sign-in gate for unconfirmed accounts.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{AuthRequest, Feed, UserProfile};
use crate::services::{ProviderSession, ProviderUser};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        // GET with a JSON body, kept for client compatibility
        .route("/resend-confirm", get(resend_confirm))
}

/// Response for a successful registration.
#[derive(Serialize)]
pub struct SignUpResponse {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
    pub needs_confirm: bool,
}

/// Register a new account with the identity provider.
///
/// No local validation of email format or password strength; that
/// responsibility belongs to the provider.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<SignUpResponse>> {
    let outcome = state.identity.sign_up(&req.email, &req.password).await?;

    tracing::info!(email = %req.email, "Signup forwarded to provider");

    Ok(Json(SignUpResponse {
        user: outcome.user,
        session: outcome.session,
        needs_confirm: true,
    }))
}

/// Generic status response.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Ask the provider to resend the signup confirmation email.
///
/// The request body carries the full credential pair; the password is
/// accepted but unused.
async fn resend_confirm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<StatusResponse>> {
    state.identity.resend_confirmation(&req.email).await?;

    Ok(Json(StatusResponse {
        status: "ok",
        message: "Confirmation email resent",
    }))
}

/// Authenticate and assemble the signed-in user.
///
/// Post-conditions checked locally:
/// - a session without a user record fails with "Unknown email";
/// - an account whose email was never confirmed is gated out with 403,
///   regardless of password correctness.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<UserProfile>> {
    let session = state
        .identity
        .sign_in_with_password(&req.email, &req.password)
        .await?;

    let user = session.user.ok_or(AppError::UnknownAccount)?;

    if user.email_confirmed_at.is_none() {
        tracing::info!(email = %req.email, "Sign-in blocked: email not confirmed");
        return Err(AppError::UnconfirmedEmail);
    }

    Ok(Json(UserProfile {
        id: user.id,
        email: user.email.unwrap_or(req.email),
        access_token: session.access_token,
        // Songs come from the recommendation service, not wired up yet
        feed: Feed::default(),
    }))
}
