//! Feed placeholder returned on sign-in.
//!
//! The shape is fixed so clients can code against it, but the recommendation
//! engine that fills it lives elsewhere; this service always returns an
//! empty song list.

use serde::{Deserialize, Serialize};

/// A recommended song.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub composer: String,
    pub style: String,
    pub id: String,
    pub difficulty: i32,
    pub percentage: i32,
}

/// Recommended content for a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    pub songs: Vec<Song>,
}
