// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client (Supabase/GoTrue-compatible REST API).
//!
//! Handles:
//! - Registration and password sign-in
//! - Confirmation email resend
//! - Session verification from a token pair (with one refresh fallback)
//!
//! Every operation is a single round-trip; no retries, no local state.

use crate::error::AppError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Identity provider client.
///
/// Built once at startup and shared read-only across requests; the inner
/// `reqwest::Client` is reference-counted and safe for concurrent use.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new client for the given provider base URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    // ─── Operations ──────────────────────────────────────────────────────────

    /// Register a new account. The provider owns all email/password
    /// validation; any fault it raises is surfaced as-is.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AppError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(read_fault(response).await);
        }

        // With email confirmation enabled the provider returns a bare user
        // object; with autoconfirm it returns a full session.
        let raw: RawSignUpResponse = parse_json(response).await?;
        Ok(raw.into())
    }

    /// Authenticate with email and password (password grant).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AppError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(read_fault(response).await);
        }

        parse_json(response).await
    }

    /// Ask the provider to resend the signup confirmation email.
    pub async fn resend_confirmation(&self, email: &str) -> Result<(), AppError> {
        let url = format!("{}/auth/v1/resend", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email, "type": "signup" }))
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(read_fault(response).await);
        }
        Ok(())
    }

    /// Fetch the user owning the given access token.
    pub async fn get_user(&self, access_token: &str) -> Result<ProviderUser, AppError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = fault_message(response).await;
            return Err(AppError::TokenRejected(message));
        }
        if !status.is_success() {
            return Err(read_fault(response).await);
        }

        parse_json(response).await
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<ProviderSession, AppError> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let message = fault_message(response).await;
            return Err(AppError::TokenRejected(message));
        }

        parse_json(response).await
    }

    /// Verify a session token pair extracted from a confirmation deep link.
    ///
    /// Tries the access token first. If the provider rejects it and a
    /// refresh token is present, makes exactly one refresh attempt before
    /// giving up; the refresh is part of this operation, not a retry loop.
    pub async fn verify_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<ProviderUser, AppError> {
        match self.get_user(access_token).await {
            Ok(user) => Ok(user),
            Err(AppError::TokenRejected(msg)) => {
                let Some(refresh) = refresh_token else {
                    return Err(AppError::TokenRejected(msg));
                };
                tracing::debug!("Access token rejected, attempting refresh");
                let session = self.refresh_session(refresh).await?;
                match session.user {
                    Some(user) => Ok(user),
                    None => self.get_user(&session.access_token).await,
                }
            }
            Err(e) => Err(e),
        }
    }
}

// ─── Provider response shapes ───────────────────────────────────────────────

/// User record as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Absent until the user clicks the confirmation link.
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Session as returned by the provider's token endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<ProviderUser>,
}

/// Normalized signup result.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
}

/// Raw signup response; the shape depends on the provider's confirmation
/// settings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSignUpResponse {
    Session(ProviderSession),
    User(ProviderUser),
}

impl From<RawSignUpResponse> for SignUpOutcome {
    fn from(raw: RawSignUpResponse) -> Self {
        match raw {
            RawSignUpResponse::Session(session) => Self {
                user: session.user.clone(),
                session: Some(session),
            },
            RawSignUpResponse::User(user) => Self {
                user: Some(user),
                session: None,
            },
        }
    }
}

// ─── Fault handling ─────────────────────────────────────────────────────────

/// Error body shapes the provider is known to emit.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ProviderErrorBody {
    fn text(&self) -> Option<String> {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error.clone())
    }
}

/// Turn a non-success provider response into a typed fault.
async fn read_fault(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_fault(status, &body)
}

/// Extract the human-readable message from a non-success response.
async fn fault_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed: ProviderErrorBody = serde_json::from_str(&body).unwrap_or_default();
    parsed.text().unwrap_or_else(|| {
        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    })
}

/// Classify a provider fault into a typed error kind.
///
/// The provider has emitted several error schemas over time; parsing is
/// best-effort and the raw body is kept as the message when nothing matches.
fn classify_fault(status: StatusCode, body: &str) -> AppError {
    let parsed: ProviderErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.text().unwrap_or_else(|| {
        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        }
    });

    match parsed.error_code.as_deref() {
        Some("invalid_credentials") => return AppError::InvalidCredentials(message),
        Some("email_not_confirmed") => return AppError::UnconfirmedEmail,
        _ => {}
    }
    // Older provider versions carry the reason only in the message text
    if message.contains("Invalid login credentials") {
        return AppError::InvalidCredentials(message);
    }
    if message.contains("Email not confirmed") {
        return AppError::UnconfirmedEmail;
    }
    if status == StatusCode::UNAUTHORIZED {
        return AppError::TokenRejected(message);
    }

    AppError::Provider(message)
}

/// Parse a successful provider response body.
async fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    response
        .json()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Malformed provider response: {}", e)))
}
