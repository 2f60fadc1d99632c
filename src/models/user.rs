//! Request and response shapes for the auth endpoints.

use crate::models::Feed;
use serde::{Deserialize, Serialize};

/// Credentials as submitted by the client. Forwarded once to the identity
/// provider, never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Session token pair extracted from a confirmation deep link.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmRequest {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Signed-in user as returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub feed: Feed,
}
