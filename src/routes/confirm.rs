// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email confirmation handshake.
//!
//! Two halves: a static landing page served to the browser from the
//! confirmation link, and a verify endpoint the page calls with the token
//! pair it extracts from the URL fragment. The page then tries to hand the
//! browser off to the native app via the `anysong://` scheme.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::ConfirmRequest;
use crate::AppState;

/// Confirmation landing page, embedded at compile time.
const CONFIRM_PAGE: &str = include_str!("confirm.html");

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/confirm", get(confirm_page))
        .route("/confirm/verify", post(confirm_verify))
}

/// Serve the confirmation landing page.
///
/// Always 200; tokens travel in the URL fragment, which never reaches the
/// server, so all token handling happens in the page's script.
async fn confirm_page() -> Html<&'static str> {
    Html(CONFIRM_PAGE)
}

/// Response for a verified session.
#[derive(Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub user_id: String,
}

/// Establish a session from the token pair the page extracted.
async fn confirm_verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<VerifyResponse>> {
    let user = state
        .identity
        .verify_session(&req.access_token, req.refresh_token.as_deref())
        .await?;

    tracing::info!(user_id = %user.id, "Confirmation session verified");

    Ok(Json(VerifyResponse {
        status: "ok",
        user_id: user.id,
    }))
}
