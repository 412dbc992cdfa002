//! Runtime configuration.
//!
//! Gameplay tunables live in [`GameConfig`] and default to the values in
//! [`crate::constants`]. An optional `~/.flappy/config.json` overrides them,
//! and the leaderboard endpoint can also come from the environment.

use crate::constants::*;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};

/// Config file name inside `~/.flappy/`.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variables for the hosted leaderboard.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Gameplay tunables. Units are world units per physics tick unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gravity: f64,
    pub max_fall_speed: f64,
    pub flap_strength: f64,
    pub pipe_gap: f64,
    pub pipe_distance: f64,
    pub normal_speed: f64,
    pub boosted_speed: f64,
    /// Seconds.
    pub power_up_duration: f64,
    pub power_up_chance: f64,
    /// Milliseconds.
    pub flap_cooldown_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            flap_strength: FLAP_STRENGTH,
            pipe_gap: PIPE_GAP,
            pipe_distance: PIPE_DISTANCE,
            normal_speed: NORMAL_SPEED,
            boosted_speed: BOOSTED_SPEED,
            power_up_duration: POWER_UP_DURATION_SECS,
            power_up_chance: POWER_UP_CHANCE,
            flap_cooldown_ms: FLAP_COOLDOWN_MS,
        }
    }
}

impl GameConfig {
    /// Wider pipe gap, for players who want a gentler run.
    pub fn with_wide_gap(mut self) -> Self {
        self.pipe_gap = WIDE_PIPE_GAP;
        self
    }
}

/// Hosted leaderboard connection details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
}

/// Everything read from `~/.flappy/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supabase: Option<SupabaseConfig>,
    /// Always use the local leaderboard file even if Supabase is configured.
    pub offline: bool,
}

impl AppConfig {
    /// Load the config file (defaults if missing or invalid), then apply
    /// environment overrides.
    pub fn load() -> Self {
        let mut config: AppConfig = persistence::load_json_or_default(CONFIG_FILE);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply leaderboard overrides from an environment lookup.
    ///
    /// The service role key wins over the anon key when both are set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_SUPABASE_URL).filter(|s| !s.trim().is_empty());
        let key = lookup(ENV_SUPABASE_SERVICE_KEY)
            .or_else(|| lookup(ENV_SUPABASE_ANON_KEY))
            .filter(|s| !s.trim().is_empty());

        if let (Some(url), Some(api_key)) = (url, key) {
            self.supabase = Some(SupabaseConfig { url, api_key });
        }
    }

    /// Supabase settings, unless offline mode is forced.
    pub fn hosted_leaderboard(&self) -> Option<&SupabaseConfig> {
        if self.offline {
            None
        } else {
            self.supabase.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert!((config.gravity - GRAVITY).abs() < f64::EPSILON);
        assert!((config.pipe_gap - PIPE_GAP).abs() < f64::EPSILON);
        assert_eq!(config.flap_cooldown_ms, FLAP_COOLDOWN_MS);
    }

    #[test]
    fn test_wide_gap() {
        let config = GameConfig::default().with_wide_gap();
        assert!((config.pipe_gap - WIDE_PIPE_GAP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "game": { "gravity": 0.05 } }"#).unwrap();
        assert!((config.game.gravity - 0.05).abs() < f64::EPSILON);
        assert!((config.game.normal_speed - NORMAL_SPEED).abs() < f64::EPSILON);
        assert!(config.supabase.is_none());
        assert!(!config.offline);
    }

    #[test]
    fn test_env_requires_url_and_key() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[(ENV_SUPABASE_URL, "https://x.supabase.co")]));
        assert!(config.supabase.is_none());
    }

    #[test]
    fn test_env_prefers_service_key() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            (ENV_SUPABASE_URL, "https://x.supabase.co"),
            (ENV_SUPABASE_SERVICE_KEY, "service"),
            (ENV_SUPABASE_ANON_KEY, "anon"),
        ]));
        assert_eq!(config.supabase.unwrap().api_key, "service");
    }

    #[test]
    fn test_env_falls_back_to_anon_key() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            (ENV_SUPABASE_URL, "https://x.supabase.co"),
            (ENV_SUPABASE_ANON_KEY, "anon"),
        ]));
        assert_eq!(config.supabase.unwrap().api_key, "anon");
    }

    #[test]
    fn test_offline_hides_hosted_leaderboard() {
        let mut config = AppConfig {
            supabase: Some(SupabaseConfig {
                url: "https://x.supabase.co".to_string(),
                api_key: "k".to_string(),
            }),
            ..AppConfig::default()
        };
        assert!(config.hosted_leaderboard().is_some());
        config.offline = true;
        assert!(config.hosted_leaderboard().is_none());
    }
}
