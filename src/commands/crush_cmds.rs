use crate::commands::require_active_campaign;
use crate::database::models::CrushRow;
use crate::services::config::ConfigService;
use crate::services::crush::{self, CrushEntry, CrushSubmission};
use crate::types::errors::CommandResult;
use sqlx::SqlitePool;

pub async fn submit_crush_list_cmd(
    pool: &SqlitePool,
    config: &ConfigService,
    user_id: &str,
    entries: Vec<CrushEntry>,
) -> CommandResult<CrushSubmission> {
    let campaign = require_active_campaign(pool).await?;
    let max = config.matching_settings().max_crushes;
    Ok(crush::submit_crush_list(pool, user_id, &campaign.id, &entries, max).await?)
}

pub async fn list_mutual_crushes_cmd(pool: &SqlitePool, user_id: &str) -> CommandResult<Vec<CrushRow>> {
    let campaign = require_active_campaign(pool).await?;
    Ok(crush::list_mutual_crushes(pool, user_id, &campaign.id).await?)
}

pub async fn count_crushed_by_cmd(pool: &SqlitePool, user_id: &str) -> CommandResult<i64> {
    let campaign = require_active_campaign(pool).await?;
    Ok(crush::count_crushed_by(pool, user_id, &campaign.id).await?)
}
