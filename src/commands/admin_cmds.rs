use crate::commands::{require_active_campaign, AppState};
use crate::services::config::{ConfigService, MatchingSettings};
use crate::services::core::generation_lock::GenerationLock;
use crate::services::matching::store::SqliteMatchStore;
use crate::services::matching::types::GenerationSummary;
use crate::services::matching::MatchingService;
use crate::types::errors::{CommandError, CommandResult};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Regenerate the active campaign's match set. Fails fast with `Busy` while
/// another run for the campaign holds the lock.
pub async fn generate_matches_cmd(
    pool: &SqlitePool,
    lock: &GenerationLock,
    settings: MatchingSettings,
) -> CommandResult<GenerationSummary> {
    let campaign = require_active_campaign(pool).await?;
    let _guard = lock.acquire(&campaign.id).await.map_err(CommandError::Busy)?;
    run_generation(pool, &campaign.id, settings).await
}

async fn run_generation(
    pool: &SqlitePool,
    campaign_id: &str,
    settings: MatchingSettings,
) -> CommandResult<GenerationSummary> {
    let service = MatchingService::new(SqliteMatchStore::new(pool.clone()), settings);
    let summary = service.generate_all_matches(campaign_id).await.map_err(|e| {
        log::error!("Match generation for campaign {campaign_id} failed: {e}");
        CommandError::from(e)
    })?;
    Ok(summary)
}

/// Fire-and-forget regeneration. Queues behind any run already in flight for
/// the campaign; the outcome is only logged.
pub fn spawn_background_generation(state: &AppState) -> JoinHandle<()> {
    let pool = state.pool.clone();
    let lock = state.lock.clone();
    let config = Arc::clone(&state.config);

    tokio::spawn(async move {
        match generate_queued(&pool, &lock, &config).await {
            Ok(summary) => log::info!(
                "Background generation for campaign {} created {} matches for {} users",
                summary.campaign_id,
                summary.matches_created,
                summary.total_users
            ),
            Err(e) => log::warn!("Background generation failed: {e}"),
        }
    })
}

async fn generate_queued(
    pool: &SqlitePool,
    lock: &GenerationLock,
    config: &ConfigService,
) -> CommandResult<GenerationSummary> {
    let campaign = require_active_campaign(pool).await?;
    let _guard = lock.acquire_queued(&campaign.id).await;
    // Settings saved while queued apply to this run.
    run_generation(pool, &campaign.id, config.matching_settings()).await
}

pub fn get_matching_settings_cmd(config: &ConfigService) -> MatchingSettings {
    config.matching_settings()
}

pub async fn save_matching_settings_cmd(
    config: &ConfigService,
    settings: MatchingSettings,
) -> CommandResult<()> {
    config
        .save_matching_settings(settings)
        .await
        .map_err(CommandError::Validation)
}
