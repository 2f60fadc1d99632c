// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: a stub identity provider and app construction.
//!
//! The stub speaks just enough of the provider's REST API for the gateway's
//! client, with behavior keyed off well-known emails and tokens.

use anysong_auth::config::Config;
use anysong_auth::routes::create_router;
use anysong_auth::services::IdentityClient;
use anysong_auth::AppState;
use axum::body::Body;
use axum::extract::Query;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Account with a confirmed email; signs in successfully.
pub const CONFIRMED_EMAIL: &str = "confirmed@example.com";
/// Account the provider authenticates but whose email is unconfirmed.
#[allow(dead_code)]
pub const UNCONFIRMED_EMAIL: &str = "unconfirmed@example.com";
/// Provider returns a session without a user record.
#[allow(dead_code)]
pub const GHOST_EMAIL: &str = "ghost@example.com";
/// Provider itself rejects the sign-in with an email_not_confirmed fault.
#[allow(dead_code)]
pub const PENDING_EMAIL: &str = "pending@example.com";
/// Signup against this email reports an existing account.
#[allow(dead_code)]
pub const TAKEN_EMAIL: &str = "taken@example.com";

pub const PASSWORD: &str = "correct-password";

pub const VALID_ACCESS_TOKEN: &str = "valid-access-token";
#[allow(dead_code)]
pub const VALID_REFRESH_TOKEN: &str = "valid-refresh-token";

pub const USER_ID: &str = "9f1c7a54-1111-2222-3333-a1b2c3d4e5f6";

fn confirmed_user() -> Value {
    json!({
        "id": USER_ID,
        "email": CONFIRMED_EMAIL,
        "email_confirmed_at": "2026-01-01T00:00:00Z",
        "created_at": "2025-12-31T00:00:00Z"
    })
}

fn session(user: Value) -> Value {
    json!({
        "access_token": VALID_ACCESS_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": VALID_REFRESH_TOKEN,
        "user": user
    })
}

async fn stub_signup(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_string();

    if email == TAKEN_EMAIL {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "code": 422,
                "error_code": "user_already_exists",
                "msg": "User already registered"
            })),
        );
    }

    // Confirmation pending: bare user object, no session
    (
        StatusCode::OK,
        Json(json!({
            "id": USER_ID,
            "email": email,
            "email_confirmed_at": null,
            "created_at": "2026-01-01T00:00:00Z"
        })),
    )
}

async fn stub_token(
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    match params.get("grant_type").map(String::as_str) {
        Some("password") => {
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();

            if password != PASSWORD {
                return invalid_credentials();
            }
            match email {
                CONFIRMED_EMAIL => (StatusCode::OK, Json(session(confirmed_user()))),
                UNCONFIRMED_EMAIL => {
                    let user = json!({
                        "id": USER_ID,
                        "email": UNCONFIRMED_EMAIL,
                        "email_confirmed_at": null
                    });
                    (StatusCode::OK, Json(session(user)))
                }
                GHOST_EMAIL => (StatusCode::OK, Json(session(Value::Null))),
                PENDING_EMAIL => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "code": 400,
                        "error_code": "email_not_confirmed",
                        "msg": "Email not confirmed"
                    })),
                ),
                _ => invalid_credentials(),
            }
        }
        Some("refresh_token") => {
            if body["refresh_token"].as_str() == Some(VALID_REFRESH_TOKEN) {
                (StatusCode::OK, Json(session(confirmed_user())))
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "code": 400,
                        "error_code": "refresh_token_not_found",
                        "msg": "Invalid Refresh Token: Refresh Token Not Found"
                    })),
                )
            }
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "unsupported grant type" })),
        ),
    }
}

fn invalid_credentials() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "code": 400,
            "error_code": "invalid_credentials",
            "msg": "Invalid login credentials"
        })),
    )
}

async fn stub_resend(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"].as_str().unwrap_or_default().is_empty() || body["type"] != "signup" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "Missing email or unsupported type" })),
        );
    }
    (StatusCode::OK, Json(json!({})))
}

async fn stub_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if authorization == format!("Bearer {}", VALID_ACCESS_TOKEN) {
        (StatusCode::OK, Json(confirmed_user()))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT: unable to parse or verify signature" })),
        )
    }
}

/// Spawn the stub provider on an ephemeral port; returns its base URL.
pub async fn spawn_stub_provider() -> String {
    let app = Router::new()
        .route("/auth/v1/signup", post(stub_signup))
        .route("/auth/v1/token", post(stub_token))
        .route("/auth/v1/resend", post(stub_resend))
        .route("/auth/v1/user", get(stub_user));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub provider");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Create a test app wired to a fresh stub provider.
pub async fn create_test_app() -> axum::Router {
    let base_url = spawn_stub_provider().await;

    let mut config = Config::test_default();
    config.supabase_url = base_url.clone();

    let identity = IdentityClient::new(&base_url, &config.supabase_api_key);
    let state = Arc::new(AppState { config, identity });

    create_router(state)
}

/// Build a JSON request for the router under test.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}
