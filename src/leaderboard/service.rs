//! Score submission and ranking on top of a [`LeaderboardStore`].

use super::local::LocalStore;
use super::store::{LeaderboardStore, MemoryStore};
use super::supabase::SupabaseStore;
use super::types::{LeaderboardEntry, SubmitResult};
use crate::config::AppConfig;

pub const CREATE_USER_FAILED: &str = "Failed to create user";
pub const SAVE_SCORE_FAILED: &str = "Failed to save score";

/// Stateless per call; construct once at startup and share.
pub struct LeaderboardService {
    store: Box<dyn LeaderboardStore>,
}

impl LeaderboardService {
    pub fn new<S: LeaderboardStore + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Pick a backend: Supabase when configured and not offline, otherwise
    /// the local file, otherwise memory.
    pub fn from_config(config: &AppConfig) -> Self {
        if let Some(supabase) = config.hosted_leaderboard() {
            tracing::info!(url = %supabase.url, "using hosted leaderboard");
            return Self::new(SupabaseStore::new(supabase));
        }

        match LocalStore::open_default() {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "using local leaderboard");
                Self::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "local leaderboard unreadable, using memory");
                Self::new(MemoryStore::new())
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }

    /// Record `score` for `username`, creating the user on first sight.
    ///
    /// A user created before a failed score insert is left in place.
    pub fn submit_score(&self, username: &str, score: u32) -> SubmitResult {
        let existing = match self.store.find_user(username) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, username, "user lookup failed, creating instead");
                None
            }
        };

        let user_id = match existing {
            Some(id) => id,
            None => match self.store.create_user(username) {
                Ok(id) => id,
                Err(e) => {
                    tracing::error!(error = %e, username, "error creating user");
                    return SubmitResult::failed(CREATE_USER_FAILED);
                }
            },
        };

        if let Err(e) = self.store.insert_score(&user_id, score) {
            tracing::error!(error = %e, username, score, "error saving score");
            return SubmitResult::failed(SAVE_SCORE_FAILED);
        }

        tracing::info!(username, score, "score saved");
        SubmitResult::ok()
    }

    /// Best `limit` scores, highest first. Failures yield an empty list.
    pub fn fetch_top_scores(&self, limit: usize) -> Vec<LeaderboardEntry> {
        match self.store.top_scores(limit) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries.truncate(limit);
                entries
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching leaderboard");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::types::LeaderboardError;

    /// Store whose individual operations can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_lookup: bool,
        fail_create: bool,
        fail_insert: bool,
        fail_top: bool,
    }

    fn boom() -> LeaderboardError {
        LeaderboardError::MissingRow("injected")
    }

    impl LeaderboardStore for FlakyStore {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn find_user(&self, username: &str) -> Result<Option<String>, LeaderboardError> {
            if self.fail_lookup {
                return Err(boom());
            }
            self.inner.find_user(username)
        }

        fn create_user(&self, username: &str) -> Result<String, LeaderboardError> {
            if self.fail_create {
                return Err(boom());
            }
            self.inner.create_user(username)
        }

        fn insert_score(&self, user_id: &str, score: u32) -> Result<(), LeaderboardError> {
            if self.fail_insert {
                return Err(boom());
            }
            self.inner.insert_score(user_id, score)
        }

        fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            if self.fail_top {
                return Err(boom());
            }
            self.inner.top_scores(limit)
        }
    }

    #[test]
    fn test_submit_success() {
        let service = LeaderboardService::new(MemoryStore::new());
        assert_eq!(service.submit_score("alice", 12), SubmitResult::ok());
        let top = service.fetch_top_scores(10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].username, "alice");
    }

    #[test]
    fn test_create_failure_reports_error() {
        let service = LeaderboardService::new(FlakyStore {
            fail_create: true,
            ..FlakyStore::default()
        });
        let result = service.submit_score("bob", 3);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(CREATE_USER_FAILED));
    }

    #[test]
    fn test_insert_failure_keeps_created_user() {
        let store = FlakyStore {
            fail_insert: true,
            ..FlakyStore::default()
        };
        let service = LeaderboardService::new(store);
        let result = service.submit_score("carol", 8);
        assert_eq!(result.error.as_deref(), Some(SAVE_SCORE_FAILED));
        assert!(service.fetch_top_scores(10).is_empty());
        // The user row stays behind; a retry reuses it.
        assert!(!service.submit_score("carol", 8).success);
    }

    #[test]
    fn test_lookup_failure_falls_back_to_create() {
        let service = LeaderboardService::new(FlakyStore {
            fail_lookup: true,
            ..FlakyStore::default()
        });
        assert!(service.submit_score("dave", 4).success);
    }

    #[test]
    fn test_fetch_failure_is_empty() {
        let service = LeaderboardService::new(FlakyStore {
            fail_top: true,
            ..FlakyStore::default()
        });
        assert!(service.fetch_top_scores(10).is_empty());
    }

    #[test]
    fn test_fetch_zero_limit() {
        let service = LeaderboardService::new(MemoryStore::new());
        service.submit_score("erin", 5);
        assert!(service.fetch_top_scores(0).is_empty());
    }

    #[test]
    fn test_existing_user_not_recreated() {
        // A second create for the same name would conflict and fail.
        let service = LeaderboardService::new(FlakyStore::default());
        assert!(service.submit_score("frank", 1).success);
        assert!(service.submit_score("frank", 2).success);
        assert_eq!(service.backend_name(), "flaky");
        assert_eq!(service.fetch_top_scores(10).len(), 2);
    }
}
