// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - identity provider integration.

pub mod identity;

pub use identity::{IdentityClient, ProviderSession, ProviderUser, SignUpOutcome};
