use crate::database::models::MatchRow;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const MATCH_COLUMNS: &str = "id, campaign_id, user1_id, user2_id, compatibility_score, match_tier, \
     shared_interests, is_mutual_crush, rank_for_user1, rank_for_user2, is_revealed, revealed_at, \
     is_mutual_interest, messaging_unlocked";

/// Insert payload for one generated match.
#[derive(Debug, Clone)]
pub struct NewMatchRow {
    pub campaign_id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub compatibility_score: f64,
    pub match_tier: String,
    /// JSON object of rounded category sub-scores.
    pub shared_interests: String,
    pub is_mutual_crush: bool,
    pub rank_for_user1: Option<i64>,
    pub rank_for_user2: Option<i64>,
}

/// Remove every match (with its interactions and messages) for a campaign in
/// one transaction.
/// Returns the number of matches removed.
pub async fn delete_matches_by_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM match_interactions
         WHERE match_id IN (SELECT id FROM matches WHERE campaign_id = ?)",
    )
    .bind(campaign_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "DELETE FROM messages
         WHERE match_id IN (SELECT id FROM matches WHERE campaign_id = ?)",
    )
    .bind(campaign_id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM matches WHERE campaign_id = ?")
        .bind(campaign_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}

/// Insert a match; new matches start unrevealed with no mutual interest.
pub async fn insert_match(pool: &SqlitePool, row: &NewMatchRow) -> Result<String, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO matches (id, campaign_id, user1_id, user2_id, compatibility_score, match_tier,
            shared_interests, is_mutual_crush, rank_for_user1, rank_for_user2, is_revealed)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(&id)
    .bind(&row.campaign_id)
    .bind(&row.user1_id)
    .bind(&row.user2_id)
    .bind(row.compatibility_score)
    .bind(&row.match_tier)
    .bind(&row.shared_interests)
    .bind(row.is_mutual_crush)
    .bind(row.rank_for_user1)
    .bind(row.rank_for_user2)
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_match(pool: &SqlitePool, match_id: &str) -> Result<Option<MatchRow>, sqlx::Error> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?");
    sqlx::query_as::<_, MatchRow>(&sql)
        .bind(match_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_matches_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<MatchRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE campaign_id = ?
         ORDER BY compatibility_score DESC, user1_id, user2_id"
    );
    sqlx::query_as::<_, MatchRow>(&sql)
        .bind(campaign_id)
        .fetch_all(pool)
        .await
}

/// A user's matches in a campaign, ordered by that user's own rank.
pub async fn list_matches_for_user(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<MatchRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches
         WHERE campaign_id = ? AND (user1_id = ? OR user2_id = ?)
         ORDER BY CASE WHEN user1_id = ? THEN rank_for_user1 ELSE rank_for_user2 END, id"
    );
    sqlx::query_as::<_, MatchRow>(&sql)
        .bind(campaign_id)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn count_matches_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches WHERE campaign_id = ?")
        .bind(campaign_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn reveal_match(
    pool: &SqlitePool,
    match_id: &str,
    revealed_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE matches SET is_revealed = 1, revealed_at = COALESCE(revealed_at, ?) WHERE id = ?",
    )
    .bind(revealed_at)
    .bind(match_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_interaction(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
    interaction_type: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO match_interactions (id, match_id, user_id, interaction_type) VALUES (?, ?, ?, ?)",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(match_id)
    .bind(user_id)
    .bind(interaction_type)
    .execute(pool)
    .await?;
    Ok(())
}

/// Latest interaction type recorded by `user_id` on a match.
pub async fn latest_interaction(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT interaction_type FROM match_interactions
         WHERE match_id = ? AND user_id = ?
         ORDER BY created_at DESC, rowid DESC LIMIT 1",
    )
    .bind(match_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_mutual_interest(pool: &SqlitePool, match_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE matches SET is_mutual_interest = 1, messaging_unlocked = 1 WHERE id = ?",
    )
    .bind(match_id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/match_repo_test.rs"]
mod tests;
