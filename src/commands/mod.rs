//! Command layer: resolves the active campaign, takes locks and maps service
//! errors to [`CommandError`](crate::types::errors::CommandError).

pub mod admin_cmds;
pub mod campaign_cmds;
pub mod crush_cmds;
pub mod match_cmds;
pub mod message_cmds;
pub mod survey_cmds;

use crate::database::campaign_repo;
use crate::database::models::CampaignRow;
use crate::services::config::{AppConfig, ConfigService};
use crate::services::core::generation_lock::GenerationLock;
use crate::types::errors::{CommandError, CommandResult};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared handles every command may need. Cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ConfigService>,
    pub lock: GenerationLock,
    pub app_config: AppConfig,
}

impl AppState {
    pub async fn new(pool: SqlitePool, app_config: AppConfig) -> Self {
        let config = ConfigService::init(pool.clone()).await;
        Self {
            pool,
            config: Arc::new(config),
            lock: GenerationLock::new(),
            app_config,
        }
    }
}

pub(crate) async fn require_active_campaign(pool: &SqlitePool) -> CommandResult<CampaignRow> {
    campaign_repo::get_active_campaign(pool)
        .await?
        .ok_or_else(|| CommandError::Precondition("No active campaign found".into()))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
