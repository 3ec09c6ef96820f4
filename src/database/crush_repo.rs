use crate::database::models::CrushRow;
use sqlx::{SqliteConnection, SqlitePool};

/// Emails a user declared as crushes in a campaign.
pub async fn list_crush_emails(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT crush_email FROM crush_lists WHERE user_id = ? AND campaign_id = ? ORDER BY crush_email",
    )
    .bind(user_id)
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

pub async fn list_crushes_for_user(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<CrushRow>, sqlx::Error> {
    sqlx::query_as::<_, CrushRow>(
        "SELECT id, user_id, campaign_id, crush_email, crush_name, is_mutual
         FROM crush_lists WHERE user_id = ? AND campaign_id = ?
         ORDER BY created_at, id",
    )
    .bind(user_id)
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Whether `user_id` listed `crush_email` in this campaign.
pub async fn has_crush_on(
    conn: &mut SqliteConnection,
    user_id: &str,
    campaign_id: &str,
    crush_email: &str,
) -> Result<bool, sqlx::Error> {
    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM crush_lists WHERE user_id = ? AND campaign_id = ? AND crush_email = ? LIMIT 1",
    )
    .bind(user_id)
    .bind(campaign_id)
    .bind(crush_email)
    .fetch_optional(conn)
    .await?;
    Ok(existing.is_some())
}

/// User id owning `email`, if registered.
pub async fn find_user_id_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(conn)
        .await
}

pub async fn count_crushed_by(
    pool: &SqlitePool,
    crush_email: &str,
    campaign_id: &str,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM crush_lists WHERE crush_email = ? AND campaign_id = ?",
    )
    .bind(crush_email)
    .bind(campaign_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn delete_crushes_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
    campaign_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM crush_lists WHERE user_id = ? AND campaign_id = ?")
        .bind(user_id)
        .bind(campaign_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn insert_crush(
    conn: &mut SqliteConnection,
    user_id: &str,
    campaign_id: &str,
    crush_email: &str,
    crush_name: Option<&str>,
    is_mutual: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO crush_lists (id, user_id, campaign_id, crush_email, crush_name, is_mutual)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(campaign_id)
    .bind(crush_email)
    .bind(crush_name)
    .bind(is_mutual)
    .execute(conn)
    .await?;
    Ok(())
}

/// Flag the reverse declaration (`user_id` → `crush_email`) as mutual.
pub async fn mark_mutual(
    conn: &mut SqliteConnection,
    user_id: &str,
    campaign_id: &str,
    crush_email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE crush_lists SET is_mutual = 1 WHERE user_id = ? AND campaign_id = ? AND crush_email = ?",
    )
    .bind(user_id)
    .bind(campaign_id)
    .bind(crush_email)
    .execute(conn)
    .await?;
    Ok(())
}

/// Clear mutual flags on other users' rows pointing at `email`.
/// Called before a user's list is replaced, so stale reciprocity is dropped.
pub async fn clear_mutual_pointing_at(
    conn: &mut SqliteConnection,
    email: &str,
    campaign_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE crush_lists SET is_mutual = 0 WHERE crush_email = ? AND campaign_id = ?")
        .bind(email)
        .bind(campaign_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/crush_repo_test.rs"]
mod tests;
