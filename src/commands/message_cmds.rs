use crate::database::models::MessageRow;
use crate::database::{campaign_repo, match_repo};
use crate::services::campaign::{action_allowed, campaign_phase, CampaignAction};
use crate::services::message;
use crate::types::errors::{CommandError, CommandResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Sending is bounded by the match's campaign schedule.
async fn require_messaging_window(
    pool: &SqlitePool,
    match_id: &str,
    now: DateTime<Utc>,
) -> CommandResult<()> {
    // A missing match is reported by the service.
    let Some(row) = match_repo::get_match(pool, match_id).await? else {
        return Ok(());
    };
    let campaign = campaign_repo::get_campaign(pool, &row.campaign_id)
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("campaign {}", row.campaign_id)))?;

    let phase = campaign_phase(&campaign, now);
    if !action_allowed(phase, CampaignAction::SendMessages) {
        return Err(CommandError::Precondition(format!(
            "Messaging is not open during the {phase} phase"
        )));
    }
    Ok(())
}

pub async fn send_message_cmd(
    pool: &SqlitePool,
    user_id: &str,
    match_id: &str,
    content: &str,
) -> CommandResult<MessageRow> {
    let now = Utc::now();
    require_messaging_window(pool, match_id, now).await?;
    Ok(message::send_message(pool, match_id, user_id, content, now).await?)
}

pub async fn list_messages_cmd(
    pool: &SqlitePool,
    user_id: &str,
    match_id: &str,
) -> CommandResult<Vec<MessageRow>> {
    Ok(message::list_messages(pool, match_id, user_id, Utc::now()).await?)
}

pub async fn mark_messages_read_cmd(
    pool: &SqlitePool,
    user_id: &str,
    match_id: &str,
    message_ids: Vec<String>,
) -> CommandResult<u64> {
    if message_ids.is_empty() {
        return Err(CommandError::Validation("No message ids given".into()));
    }
    Ok(message::mark_read(pool, match_id, user_id, &message_ids, Utc::now()).await?)
}

pub async fn unread_count_cmd(pool: &SqlitePool, user_id: &str) -> CommandResult<i64> {
    Ok(message::unread_count(pool, user_id).await?)
}
