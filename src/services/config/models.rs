use crate::services::matching::types::{MAX_MATCHES_PER_USER, MAX_TOTAL_MATCHES, MIN_MATCH_SCORE};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_MAX_CRUSHES: usize = 10;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://campus_match.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Engine tunables, persisted as JSON under the `matching` settings key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingSettings {
    pub max_matches_per_user: u32,
    pub min_score: f64,
    pub max_total_matches: usize,
    pub max_crushes: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_matches_per_user: MAX_MATCHES_PER_USER,
            min_score: MIN_MATCH_SCORE,
            max_total_matches: MAX_TOTAL_MATCHES,
            max_crushes: DEFAULT_MAX_CRUSHES,
        }
    }
}

impl MatchingSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_matches_per_user == 0 {
            return Err("max_matches_per_user must be at least 1".into());
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(format!("min_score must be within 0..=100, got {}", self.min_score));
        }
        if self.max_total_matches == 0 {
            return Err("max_total_matches must be at least 1".into());
        }
        if self.max_crushes == 0 {
            return Err("max_crushes must be at least 1".into());
        }
        Ok(())
    }
}

/// Process-level configuration read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Regenerate matches in the background whenever a user completes the survey.
    pub match_on_survey_complete: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            match_on_survey_complete: false,
        }
    }
}

impl AppConfig {
    /// Load from the process environment after reading `.env` if present.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env loaded: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_url),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
            match_on_survey_complete: parse_or(
                &lookup,
                "MATCH_ON_SURVEY_COMPLETE",
                defaults.match_on_survey_complete,
            ),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {key} value '{raw}': {e}; using default {default}");
            default
        }),
    }
}
