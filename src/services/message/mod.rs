//! Messaging between the two participants of a match. A conversation opens
//! only after both sides have expressed interest.

use crate::database::match_repo;
use crate::database::message_repo;
use crate::database::models::{MatchRow, MessageRow};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Match not found: {0}")]
    NotFound(String),

    #[error("User {user_id} is not part of match {match_id}")]
    Forbidden { match_id: String, user_id: String },

    #[error("Messaging is not yet available for match {0}")]
    Locked(String),

    #[error("Message content cannot be empty")]
    EmptyContent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Load a match the user takes part in and whose messaging is unlocked.
async fn open_conversation(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
) -> Result<MatchRow, MessageError> {
    let row = match_repo::get_match(pool, match_id)
        .await?
        .ok_or_else(|| MessageError::NotFound(match_id.to_string()))?;
    if !row.involves(user_id) {
        return Err(MessageError::Forbidden {
            match_id: match_id.to_string(),
            user_id: user_id.to_string(),
        });
    }
    if !row.messaging_unlocked {
        return Err(MessageError::Locked(match_id.to_string()));
    }
    Ok(row)
}

/// Send a message to the other participant.
pub async fn send_message(
    pool: &SqlitePool,
    match_id: &str,
    sender_id: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<MessageRow, MessageError> {
    if content.trim().is_empty() {
        return Err(MessageError::EmptyContent);
    }
    let row = open_conversation(pool, match_id, sender_id).await?;
    let recipient = row
        .partner_of(sender_id)
        .ok_or_else(|| MessageError::Forbidden {
            match_id: match_id.to_string(),
            user_id: sender_id.to_string(),
        })?;

    let message =
        message_repo::insert_message(pool, match_id, sender_id, recipient, content, now).await?;
    log::debug!("Match {match_id}: message {} sent by {sender_id}", message.id);
    Ok(message)
}

/// The match's conversation, oldest first. Messages addressed to the reader
/// are marked read afterwards; the returned list shows them as they were.
pub async fn list_messages(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<MessageRow>, MessageError> {
    open_conversation(pool, match_id, user_id).await?;
    let messages = message_repo::list_messages_for_match(pool, match_id).await?;

    let unread: Vec<String> = messages
        .iter()
        .filter(|m| m.recipient_id == user_id && !m.is_read)
        .map(|m| m.id.clone())
        .collect();
    if !unread.is_empty() {
        if let Err(e) = message_repo::mark_read(pool, match_id, user_id, &unread, now).await {
            log::warn!("Match {match_id}: failed to mark messages read for {user_id}: {e}");
        }
    }

    Ok(messages)
}

/// Mark specific messages read. Ids that are not addressed to `user_id` in
/// this match are ignored. Returns how many messages changed.
pub async fn mark_read(
    pool: &SqlitePool,
    match_id: &str,
    user_id: &str,
    message_ids: &[String],
    now: DateTime<Utc>,
) -> Result<u64, MessageError> {
    open_conversation(pool, match_id, user_id).await?;
    Ok(message_repo::mark_read(pool, match_id, user_id, message_ids, now).await?)
}

pub async fn unread_count(pool: &SqlitePool, user_id: &str) -> Result<i64, MessageError> {
    Ok(message_repo::count_unread_for_user(pool, user_id).await?)
}

#[cfg(test)]
#[path = "tests/message_tests.rs"]
mod tests;
