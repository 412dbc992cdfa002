//! Storage seam for the leaderboard, plus the in-process tables shared by
//! the memory and local-file backends.

use super::types::{LeaderboardEntry, LeaderboardError};
use crate::constants::UNKNOWN_USERNAME;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// The four queries the leaderboard needs from a backing store.
pub trait LeaderboardStore: Send + Sync {
    /// Short backend name for logs and the CLI.
    fn name(&self) -> &'static str;

    /// Look up a user id by exact username.
    fn find_user(&self, username: &str) -> Result<Option<String>, LeaderboardError>;

    /// Create a user and return its id. Usernames are unique.
    fn create_user(&self, username: &str) -> Result<String, LeaderboardError>;

    fn insert_score(&self, user_id: &str, score: u32) -> Result<(), LeaderboardError>;

    /// Highest scores first, at most `limit` rows.
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// `users` and `scores` tables held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardTables {
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub scores: Vec<ScoreRow>,
}

impl LeaderboardTables {
    pub fn find_user(&self, username: &str) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.id.clone())
    }

    pub fn create_user(&mut self, username: &str) -> Result<String, LeaderboardError> {
        if self.find_user(username).is_some() {
            return Err(LeaderboardError::Conflict(username.to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.users.push(UserRow {
            id: id.clone(),
            username: username.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn insert_score(&mut self, user_id: &str, score: u32) {
        self.scores.push(ScoreRow {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            score,
            created_at: Utc::now(),
        });
    }

    /// Join scores with usernames, best first. Ties keep insertion order.
    pub fn top_scores(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&ScoreRow> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        ranked
            .into_iter()
            .take(limit)
            .map(|row| LeaderboardEntry {
                id: row.id.clone(),
                score: row.score,
                created_at: row.created_at,
                username: self
                    .users
                    .iter()
                    .find(|u| u.id == row.user_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
            })
            .collect()
    }

    pub fn scores_for(&self, username: &str) -> Vec<u32> {
        match self.find_user(username) {
            Some(id) => self
                .scores
                .iter()
                .filter(|s| s.user_id == id)
                .map(|s| s.score)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<LeaderboardTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current tables, for inspection.
    pub fn tables(&self) -> LeaderboardTables {
        self.tables
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl LeaderboardStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn find_user(&self, username: &str) -> Result<Option<String>, LeaderboardError> {
        let tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        Ok(tables.find_user(username))
    }

    fn create_user(&self, username: &str) -> Result<String, LeaderboardError> {
        let mut tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        tables.create_user(username)
    }

    fn insert_score(&self, user_id: &str, score: u32) -> Result<(), LeaderboardError> {
        let mut tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        tables.insert_score(user_id, score);
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        Ok(tables.top_scores(limit))
    }
}
