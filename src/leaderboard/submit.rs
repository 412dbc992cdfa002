//! Background leaderboard calls.
//!
//! Network round-trips run on their own thread so the game loop never waits
//! on them. The loop polls the returned handle once per frame.

use super::service::LeaderboardService;
use super::types::LeaderboardEntry;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Shown when the worker thread dies without reporting back.
pub const SUBMIT_CRASHED: &str = "Failed to save score. Please try again.";

/// What the game-over screen says about the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// No game over yet.
    Idle,
    /// Score of zero or no player name; nothing is sent.
    TooLow,
    Saving,
    Saved,
    Failed(String),
}

impl SaveStatus {
    /// Line for the game-over screen, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            SaveStatus::Idle => None,
            SaveStatus::TooLow => Some("Score too low to save".to_string()),
            SaveStatus::Saving => Some("Saving score...".to_string()),
            SaveStatus::Saved => Some("Score saved to leaderboard!".to_string()),
            SaveStatus::Failed(e) => Some(e.clone()),
        }
    }
}

/// Result of polling a background task.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
    Waiting,
    Done(T),
    /// The worker went away without an answer.
    Lost,
}

/// Handle to a value being computed on another thread.
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(work());
        });
        Self { rx }
    }

    pub fn poll(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskPoll::Done(value),
            Err(TryRecvError::Empty) => TaskPoll::Waiting,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }

    /// Block until the worker answers. Returns `None` if it died.
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }
}

/// An in-flight score submission.
pub struct ScoreSubmission {
    pending: Pending<SaveStatus>,
}

impl ScoreSubmission {
    /// Send `(username, score)` taken at game over.
    pub fn start(service: Arc<LeaderboardService>, username: String, score: u32) -> Self {
        let pending = Pending::spawn(move || {
            let result = service.submit_score(&username, score);
            if result.success {
                SaveStatus::Saved
            } else {
                SaveStatus::Failed(result.error.unwrap_or_else(|| SUBMIT_CRASHED.to_string()))
            }
        });
        Self { pending }
    }

    /// `None` while the request is still running.
    pub fn poll(&self) -> Option<SaveStatus> {
        match self.pending.poll() {
            TaskPoll::Waiting => None,
            TaskPoll::Done(status) => Some(status),
            TaskPoll::Lost => Some(SaveStatus::Failed(SUBMIT_CRASHED.to_string())),
        }
    }
}

/// Fetch the leaderboard off the game thread.
pub fn fetch_in_background(
    service: Arc<LeaderboardService>,
    limit: usize,
) -> Pending<Vec<LeaderboardEntry>> {
    Pending::spawn(move || service.fetch_top_scores(limit))
}
