use crate::database::models::CampaignRow;
use sqlx::SqlitePool;

const CAMPAIGN_COLUMNS: &str = "id, name, survey_open_date, survey_close_date, \
     profile_update_start_date, profile_update_end_date, results_release_date, \
     is_active, total_participants, total_matches_generated";

/// The most recently created active campaign, if any.
pub async fn get_active_campaign(pool: &SqlitePool) -> Result<Option<CampaignRow>, sqlx::Error> {
    let sql = format!(
        "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE is_active = 1 \
         ORDER BY created_at DESC, rowid DESC LIMIT 1"
    );
    sqlx::query_as::<_, CampaignRow>(&sql)
        .fetch_optional(pool)
        .await
}

pub async fn get_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Option<CampaignRow>, sqlx::Error> {
    let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?");
    sqlx::query_as::<_, CampaignRow>(&sql)
        .bind(campaign_id)
        .fetch_optional(pool)
        .await
}

/// Insert a campaign row. Counters start at zero.
pub async fn insert_campaign(pool: &SqlitePool, campaign: &CampaignRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO campaigns (id, name, survey_open_date, survey_close_date,
            profile_update_start_date, profile_update_end_date, results_release_date, is_active)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&campaign.id)
    .bind(&campaign.name)
    .bind(campaign.survey_open_date)
    .bind(campaign.survey_close_date)
    .bind(campaign.profile_update_start_date)
    .bind(campaign.profile_update_end_date)
    .bind(campaign.results_release_date)
    .bind(campaign.is_active)
    .execute(pool)
    .await?;
    Ok(())
}

/// Record aggregate stats after a generation run.
/// Fails with `RowNotFound` when the campaign does not exist.
pub async fn update_campaign_stats(
    pool: &SqlitePool,
    campaign_id: &str,
    total_participants: i64,
    total_matches_generated: i64,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        "UPDATE campaigns SET total_participants = ?, total_matches_generated = ? WHERE id = ?",
    )
    .bind(total_participants)
    .bind(total_matches_generated)
    .bind(campaign_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/campaign_repo_test.rs"]
mod tests;
