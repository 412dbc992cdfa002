//! Flappy - terminal Flappy Bird with power-ups and a global leaderboard.
//!
//! This module exposes the game logic for testing and external use.

pub mod app;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod utils;

// UI module is not exposed as it's tightly coupled to the terminal
