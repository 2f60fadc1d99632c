// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Request/response shapes only; nothing here is persisted.

pub mod feed;
pub mod user;

pub use feed::{Feed, Song};
pub use user::{AuthRequest, ConfirmRequest, UserProfile};
