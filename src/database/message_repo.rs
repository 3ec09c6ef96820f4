use crate::database::models::MessageRow;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const MESSAGE_COLUMNS: &str =
    "id, match_id, sender_id, recipient_id, content, is_read, sent_at, read_at";

pub async fn insert_message(
    pool: &SqlitePool,
    match_id: &str,
    sender_id: &str,
    recipient_id: &str,
    content: &str,
    sent_at: DateTime<Utc>,
) -> Result<MessageRow, sqlx::Error> {
    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO messages (id, match_id, sender_id, recipient_id, content, is_read, sent_at)
         VALUES (?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(&id)
    .bind(match_id)
    .bind(sender_id)
    .bind(recipient_id)
    .bind(content)
    .bind(sent_at)
    .execute(pool)
    .await?;

    Ok(MessageRow {
        id,
        match_id: match_id.to_string(),
        sender_id: sender_id.to_string(),
        recipient_id: recipient_id.to_string(),
        content: content.to_string(),
        is_read: false,
        sent_at,
        read_at: None,
    })
}

/// Conversation for one match, oldest first.
pub async fn list_messages_for_match(
    pool: &SqlitePool,
    match_id: &str,
) -> Result<Vec<MessageRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE match_id = ? ORDER BY sent_at, rowid"
    );
    sqlx::query_as::<_, MessageRow>(&sql)
        .bind(match_id)
        .fetch_all(pool)
        .await
}

/// Mark the given messages read, but only those in `match_id` addressed to
/// `recipient_id` and still unread. Returns the number of rows flipped.
pub async fn mark_read(
    pool: &SqlitePool,
    match_id: &str,
    recipient_id: &str,
    message_ids: &[String],
    read_at: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    if message_ids.is_empty() {
        return Ok(0);
    }

    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new("UPDATE messages SET is_read = 1, read_at = ");
    qb.push_bind(read_at);
    qb.push(" WHERE is_read = 0 AND match_id = ");
    qb.push_bind(match_id);
    qb.push(" AND recipient_id = ");
    qb.push_bind(recipient_id);
    qb.push(" AND id IN (");
    let mut sep = qb.separated(", ");
    for id in message_ids {
        sep.push_bind(id);
    }
    qb.push(")");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Unread messages addressed to a user across every unlocked match.
pub async fn count_unread_for_user(pool: &SqlitePool, user_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM messages msg
         JOIN matches m ON m.id = msg.match_id
         WHERE msg.recipient_id = ? AND msg.is_read = 0 AND m.messaging_unlocked = 1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
#[path = "tests/message_repo_test.rs"]
mod tests;
