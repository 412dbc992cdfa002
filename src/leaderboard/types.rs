//! Leaderboard rows, results and errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// One ranked row as shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

/// Outcome of a score submission, shaped for the game-over banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub success: bool,
    pub error: Option<String>,
}

impl SubmitResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }
}

/// Errors raised by leaderboard stores.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// HTTP request failed or returned a non-success status.
    #[error("request failed: {0}")]
    Request(Box<ureq::Error>),

    /// Reading or writing a response body or local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A row could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store answered without the row it should have returned.
    #[error("missing row: {0}")]
    MissingRow(&'static str),

    /// Username already taken.
    #[error("user already exists: {0}")]
    Conflict(String),

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<ureq::Error> for LeaderboardError {
    fn from(e: ureq::Error) -> Self {
        LeaderboardError::Request(Box::new(e))
    }
}
