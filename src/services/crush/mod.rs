//! Crush declarations: each user lists up to N emails per campaign.
//! A declaration is mutual when its target listed the declarer back.

use crate::database::models::CrushRow;
use crate::database::{crush_repo, user_repo};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrushError {
    #[error("Maximum {max} crushes allowed, got {given}")]
    TooMany { max: usize, given: usize },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrushEntry {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrushSubmission {
    pub crush_count: usize,
    pub mutual_count: usize,
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Replace the user's crush list for a campaign.
///
/// Blank, duplicate and self-referencing emails are dropped. Mutual flags are
/// kept consistent on both sides: the submitter's previous reciprocity is
/// cleared and recomputed against the new list inside one transaction.
pub async fn submit_crush_list(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
    entries: &[CrushEntry],
    max_crushes: usize,
) -> Result<CrushSubmission, CrushError> {
    if entries.len() > max_crushes {
        return Err(CrushError::TooMany {
            max: max_crushes,
            given: entries.len(),
        });
    }

    let own_email = user_repo::get_user_email(pool, user_id)
        .await?
        .map(|e| normalize_email(&e))
        .ok_or_else(|| CrushError::UserNotFound(user_id.to_string()))?;

    let mut tx = pool.begin().await?;
    crush_repo::clear_mutual_pointing_at(&mut *tx, &own_email, campaign_id).await?;
    crush_repo::delete_crushes_for_user(&mut *tx, user_id, campaign_id).await?;

    let mut seen = HashSet::new();
    let mut crush_count = 0;
    let mut mutual_count = 0;

    for entry in entries {
        let email = normalize_email(&entry.email);
        if email.is_empty() || email == own_email || !seen.insert(email.clone()) {
            continue;
        }

        let target = crush_repo::find_user_id_by_email(&mut *tx, &email).await?;
        let is_mutual = match target.as_deref() {
            Some(target_id) => {
                crush_repo::has_crush_on(&mut *tx, target_id, campaign_id, &own_email).await?
            }
            None => false,
        };

        let name = entry.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        crush_repo::insert_crush(&mut *tx, user_id, campaign_id, &email, name, is_mutual).await?;

        if let (true, Some(target_id)) = (is_mutual, target.as_deref()) {
            crush_repo::mark_mutual(&mut *tx, target_id, campaign_id, &own_email).await?;
            mutual_count += 1;
        }
        crush_count += 1;
    }

    tx.commit().await?;

    log::info!(
        "User {user_id} submitted {crush_count} crushes for campaign {campaign_id} ({mutual_count} mutual)"
    );
    Ok(CrushSubmission {
        crush_count,
        mutual_count,
    })
}

pub async fn list_mutual_crushes(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<CrushRow>, CrushError> {
    let crushes = crush_repo::list_crushes_for_user(pool, user_id, campaign_id).await?;
    Ok(crushes.into_iter().filter(|c| c.is_mutual).collect())
}

/// How many users listed this user as a crush. Identities stay hidden.
pub async fn count_crushed_by(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<i64, CrushError> {
    let email = user_repo::get_user_email(pool, user_id)
        .await?
        .map(|e| normalize_email(&e))
        .ok_or_else(|| CrushError::UserNotFound(user_id.to_string()))?;
    Ok(crush_repo::count_crushed_by(pool, &email, campaign_id).await?)
}

#[cfg(test)]
#[path = "tests/crush_tests.rs"]
mod tests;
