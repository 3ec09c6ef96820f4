//! Post-generation match state: reveal and mutual-interest handshake.

use crate::database::match_repo;
use crate::database::models::MatchRow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;

pub const INTERESTED: &str = "interested";
pub const PASSED: &str = "passed";

#[derive(Debug, Error)]
pub enum InterestError {
    #[error("Match not found: {0}")]
    NotFound(String),

    #[error("User {user_id} is not part of match {match_id}")]
    Forbidden { match_id: String, user_id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestOutcome {
    pub is_mutual_interest: bool,
}

async fn load_for_participant(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
) -> Result<MatchRow, InterestError> {
    let row = match_repo::get_match(pool, match_id)
        .await?
        .ok_or_else(|| InterestError::NotFound(match_id.to_string()))?;
    if !row.involves(user_id) {
        return Err(InterestError::Forbidden {
            match_id: match_id.to_string(),
            user_id: user_id.to_string(),
        });
    }
    Ok(row)
}

/// Reveal a match to its participants. The first reveal time is kept.
pub async fn reveal_match(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<MatchRow, InterestError> {
    load_for_participant(pool, match_id, user_id).await?;
    match_repo::reveal_match(pool, match_id, now).await?;
    match_repo::get_match(pool, match_id)
        .await?
        .ok_or_else(|| InterestError::NotFound(match_id.to_string()))
}

/// Record a participant's decision. Messaging unlocks once both sides
/// are interested.
pub async fn mark_interest(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
    interested: bool,
) -> Result<InterestOutcome, InterestError> {
    let row = load_for_participant(pool, match_id, user_id).await?;
    let kind = if interested { INTERESTED } else { PASSED };
    match_repo::insert_interaction(pool, match_id, user_id, kind).await?;

    if !interested {
        return Ok(InterestOutcome {
            is_mutual_interest: row.is_mutual_interest,
        });
    }

    let Some(partner) = row.partner_of(user_id) else {
        return Ok(InterestOutcome {
            is_mutual_interest: false,
        });
    };
    let partner_choice = match_repo::latest_interaction(pool, match_id, partner).await?;
    if partner_choice.as_deref() == Some(INTERESTED) {
        match_repo::set_mutual_interest(pool, match_id).await?;
        log::info!("Match {match_id}: mutual interest, messaging unlocked");
        return Ok(InterestOutcome {
            is_mutual_interest: true,
        });
    }

    Ok(InterestOutcome {
        is_mutual_interest: row.is_mutual_interest,
    })
}

/// A user's matches for a campaign, ordered by their own rank.
pub async fn list_matches_for_user(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<MatchRow>, InterestError> {
    Ok(match_repo::list_matches_for_user(pool, user_id, campaign_id).await?)
}

#[cfg(test)]
#[path = "tests/interest_tests.rs"]
mod tests;
