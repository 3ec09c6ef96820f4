pub mod models;

pub use models::*;

use crate::database::settings_repo;
use sqlx::SqlitePool;
use std::sync::Mutex;

const MATCHING_KEY: &str = "matching";

pub struct ConfigService {
    pool: SqlitePool,
    matching: Mutex<MatchingSettings>,
}

impl ConfigService {
    /// Load persisted settings, falling back to defaults.
    pub async fn init(pool: SqlitePool) -> Self {
        let matching = Self::load_from_db(&pool).await;
        Self {
            pool,
            matching: Mutex::new(matching),
        }
    }

    async fn load_from_db(pool: &SqlitePool) -> MatchingSettings {
        let raw = match settings_repo::get_setting(pool, MATCHING_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Failed to load matching settings from DB: {e}");
                return MatchingSettings::default();
            }
        };

        let Some(raw) = raw else {
            return MatchingSettings::default();
        };

        match serde_json::from_str::<MatchingSettings>(&raw) {
            Ok(settings) if settings.validate().is_ok() => settings,
            Ok(settings) => {
                log::warn!("Stored matching settings are invalid ({settings:?}); using defaults");
                MatchingSettings::default()
            }
            Err(e) => {
                log::warn!("Corrupt matching settings ({e}); using defaults");
                MatchingSettings::default()
            }
        }
    }

    pub fn matching_settings(&self) -> MatchingSettings {
        self.matching
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn save_matching_settings(&self, settings: MatchingSettings) -> Result<(), String> {
        settings.validate()?;

        let json = serde_json::to_string(&settings).map_err(|e| e.to_string())?;
        settings_repo::set_setting(&self.pool, MATCHING_KEY, &json)
            .await
            .map_err(|e| e.to_string())?;

        *self
            .matching
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
