use crate::commands::require_active_campaign;
use crate::database::models::CampaignRow;
use crate::services::campaign::{
    action_allowed, campaign_phase, time_remaining, CampaignAction, CampaignPhase, TimeRemaining,
};
use crate::types::errors::{CommandError, CommandResult};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatus {
    pub campaign: CampaignRow,
    pub phase: CampaignPhase,
    pub time_remaining: TimeRemaining,
}

pub async fn get_active_campaign_cmd(pool: &SqlitePool) -> CommandResult<CampaignStatus> {
    let campaign = require_active_campaign(pool).await?;
    let now = Utc::now();
    let phase = campaign_phase(&campaign, now);
    let time_remaining = time_remaining(&campaign, phase, now);
    Ok(CampaignStatus {
        campaign,
        phase,
        time_remaining,
    })
}

pub async fn check_action_cmd(pool: &SqlitePool, action: &str) -> CommandResult<bool> {
    let action: CampaignAction = action.parse().map_err(CommandError::Validation)?;
    let campaign = require_active_campaign(pool).await?;
    Ok(action_allowed(campaign_phase(&campaign, Utc::now()), action))
}
