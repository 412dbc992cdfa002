//! Hosted leaderboard over Supabase's PostgREST API.
//!
//! Tables: `users(id, username unique, created_at)` and
//! `scores(id, user_id -> users.id, score, created_at)`.

use super::store::LeaderboardStore;
use super::types::{LeaderboardEntry, LeaderboardError};
use crate::config::SupabaseConfig;
use crate::constants::UNKNOWN_USERNAME;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

const USER_AGENT: &str = concat!("flappy/", env!("CARGO_PKG_VERSION"));

pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct IdRow {
    id: Value,
}

#[derive(Deserialize)]
struct UsernameRow {
    username: Option<String>,
}

#[derive(Deserialize)]
struct ScoreWithUser {
    id: Value,
    score: u32,
    created_at: DateTime<Utc>,
    users: Option<UsernameRow>,
}

/// Ids may be uuids or integers depending on the schema.
fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn rows_to_entries(rows: Vec<ScoreWithUser>) -> Vec<LeaderboardEntry> {
    rows.into_iter()
        .map(|row| LeaderboardEntry {
            id: id_to_string(&row.id),
            score: row.score,
            created_at: row.created_at,
            username: row
                .users
                .and_then(|u| u.username)
                .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
        })
        .collect()
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
    }
}

impl LeaderboardStore for SupabaseStore {
    fn name(&self) -> &'static str {
        "supabase"
    }

    fn find_user(&self, username: &str) -> Result<Option<String>, LeaderboardError> {
        let rows: Vec<IdRow> = self
            .authed(self.agent.get(&self.table_url("users")))
            .query("select", "id")
            .query("username", &format!("eq.{}", username))
            .query("limit", "1")
            .call()?
            .into_json()?;

        Ok(rows.first().map(|r| id_to_string(&r.id)))
    }

    fn create_user(&self, username: &str) -> Result<String, LeaderboardError> {
        let rows: Vec<IdRow> = self
            .authed(self.agent.post(&self.table_url("users")))
            .query("select", "id")
            .set("Prefer", "return=representation")
            .send_json(json!({ "username": username }))?
            .into_json()?;

        rows.first()
            .map(|r| id_to_string(&r.id))
            .ok_or(LeaderboardError::MissingRow("created user"))
    }

    fn insert_score(&self, user_id: &str, score: u32) -> Result<(), LeaderboardError> {
        self.authed(self.agent.post(&self.table_url("scores")))
            .set("Prefer", "return=minimal")
            .send_json(json!({ "user_id": user_id, "score": score }))?;
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let rows: Vec<ScoreWithUser> = self
            .authed(self.agent.get(&self.table_url("scores")))
            .query("select", "id,score,created_at,users(username)")
            .query("order", "score.desc")
            .query("limit", &limit.to_string())
            .call()?
            .into_json()?;

        Ok(rows_to_entries(rows))
    }
}
