// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Provider faults are carried as typed kinds rather than stringified
//! exceptions, so the HTTP layer maps each kind to a status code
//! deterministically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Provider answered with a fault we don't classify further
    /// (duplicate account, malformed email, expired link, ...).
    #[error("{0}")]
    Provider(String),

    /// Provider never answered (connect failure, transport error).
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider rejected the email/password combination.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Sign-in response carried no user record.
    #[error("Unknown email")]
    UnknownAccount,

    /// Account exists but the email was never confirmed.
    #[error("Please confirm your email first.")]
    UnconfirmedEmail,

    /// Provider rejected the session token pair.
    #[error("{0}")]
    TokenRejected(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Provider(msg) => (StatusCode::BAD_REQUEST, "provider_error", Some(msg.clone())),
            AppError::ProviderUnavailable(msg) => {
                tracing::error!(error = %msg, "Identity provider unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "provider_unavailable",
                    Some(msg.clone()),
                )
            }
            AppError::InvalidCredentials(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_credentials",
                Some(msg.clone()),
            ),
            AppError::UnknownAccount => (
                StatusCode::BAD_REQUEST,
                "unknown_account",
                Some("Unknown email".to_string()),
            ),
            AppError::UnconfirmedEmail => (
                StatusCode::FORBIDDEN,
                "unconfirmed_email",
                Some("Please confirm your email first.".to_string()),
            ),
            AppError::TokenRejected(msg) => (
                StatusCode::BAD_REQUEST,
                "token_rejected",
                Some(msg.clone()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
