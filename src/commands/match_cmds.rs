use crate::commands::require_active_campaign;
use crate::database::models::MatchRow;
use crate::services::interest::{self, InterestOutcome};
use crate::types::errors::CommandResult;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn list_my_matches_cmd(pool: &SqlitePool, user_id: &str) -> CommandResult<Vec<MatchRow>> {
    let campaign = require_active_campaign(pool).await?;
    Ok(interest::list_matches_for_user(pool, user_id, &campaign.id).await?)
}

pub async fn reveal_match_cmd(pool: &SqlitePool, user_id: &str, match_id: &str) -> CommandResult<MatchRow> {
    Ok(interest::reveal_match(pool, match_id, user_id, Utc::now()).await?)
}

pub async fn mark_interest_cmd(
    pool: &SqlitePool,
    user_id: &str,
    match_id: &str,
    interested: bool,
) -> CommandResult<InterestOutcome> {
    Ok(interest::mark_interest(pool, match_id, user_id, interested).await?)
}
