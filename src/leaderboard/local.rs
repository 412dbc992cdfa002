//! Offline leaderboard kept in a JSON file under ~/.flappy/.

use super::store::{LeaderboardStore, LeaderboardTables};
use super::types::{LeaderboardEntry, LeaderboardError};
use crate::utils::persistence;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const LEADERBOARD_FILE: &str = "leaderboard.json";

pub struct LocalStore {
    path: PathBuf,
    tables: Mutex<LeaderboardTables>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file starts empty.
    ///
    /// A file that exists but does not parse is an error and is left
    /// untouched, so a later write cannot clobber the old rows.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        let tables = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => LeaderboardTables::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    /// Open the default store in ~/.flappy/.
    pub fn open_default() -> Result<Self, LeaderboardError> {
        Self::open(persistence::save_path(LEADERBOARD_FILE)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write<F, T>(&self, f: F) -> Result<T, LeaderboardError>
    where
        F: FnOnce(&mut LeaderboardTables) -> Result<T, LeaderboardError>,
    {
        let mut tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        let out = f(&mut tables)?;
        persistence::save_json_to(&self.path, &*tables)?;
        Ok(out)
    }
}

impl LeaderboardStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    fn find_user(&self, username: &str) -> Result<Option<String>, LeaderboardError> {
        let tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        Ok(tables.find_user(username))
    }

    fn create_user(&self, username: &str) -> Result<String, LeaderboardError> {
        self.write(|tables| tables.create_user(username))
    }

    fn insert_score(&self, user_id: &str, score: u32) -> Result<(), LeaderboardError> {
        self.write(|tables| {
            tables.insert_score(user_id, score);
            Ok(())
        })
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let tables = self.tables.lock().map_err(|_| LeaderboardError::Poisoned)?;
        Ok(tables.top_scores(limit))
    }
}
