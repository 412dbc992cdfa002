//! Global leaderboard.
//!
//! A [`LeaderboardService`] wraps one [`LeaderboardStore`] backend: Supabase
//! when configured, a JSON file for offline play, or memory for tests.

pub mod local;
pub mod service;
pub mod store;
pub mod submit;
pub mod supabase;
pub mod types;

pub use local::LocalStore;
pub use service::LeaderboardService;
pub use store::{LeaderboardStore, MemoryStore};
pub use submit::{SaveStatus, ScoreSubmission};
pub use supabase::SupabaseStore;
pub use types::{LeaderboardEntry, LeaderboardError, SubmitResult};
