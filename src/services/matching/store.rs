//! Data-access seam for the matching engine.

use crate::database::match_repo::{self, NewMatchRow};
use crate::database::{campaign_repo, crush_repo, survey_repo, user_repo};
use crate::services::matching::types::{Answer, Candidate, NewMatch};
use sqlx::SqlitePool;
use std::future::Future;

/// Everything the engine reads and writes. Implementations must be shareable
/// across the tasks a background run may be spawned on.
pub trait MatchStore: Send + Sync {
    fn list_eligible_candidates(
        &self,
        campaign_id: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, sqlx::Error>> + Send;

    fn list_answers(
        &self,
        candidate_id: &str,
        campaign_id: &str,
    ) -> impl Future<Output = Result<Vec<Answer>, sqlx::Error>> + Send;

    fn list_crush_emails(
        &self,
        candidate_id: &str,
        campaign_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, sqlx::Error>> + Send;

    fn delete_matches(&self, campaign_id: &str) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;

    fn create_match(&self, new_match: &NewMatch) -> impl Future<Output = Result<String, sqlx::Error>> + Send;

    fn update_campaign_stats(
        &self,
        campaign_id: &str,
        participants: usize,
        matches_created: usize,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// `MatchStore` backed by the application database.
#[derive(Debug, Clone)]
pub struct SqliteMatchStore {
    pool: SqlitePool,
}

impl SqliteMatchStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl MatchStore for SqliteMatchStore {
    // Eligibility is account-level; every campaign sees the same pool.
    async fn list_eligible_candidates(&self, _campaign_id: &str) -> Result<Vec<Candidate>, sqlx::Error> {
        let rows = user_repo::list_eligible_candidates(&self.pool).await?;
        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    async fn list_answers(
        &self,
        candidate_id: &str,
        campaign_id: &str,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        let rows =
            survey_repo::list_answers_for_user_campaign(&self.pool, candidate_id, campaign_id).await?;
        Ok(rows.into_iter().map(Answer::from).collect())
    }

    async fn list_crush_emails(
        &self,
        candidate_id: &str,
        campaign_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        crush_repo::list_crush_emails(&self.pool, candidate_id, campaign_id).await
    }

    async fn delete_matches(&self, campaign_id: &str) -> Result<u64, sqlx::Error> {
        match_repo::delete_matches_by_campaign(&self.pool, campaign_id).await
    }

    async fn create_match(&self, new_match: &NewMatch) -> Result<String, sqlx::Error> {
        let shared_interests =
            serde_json::to_string(&new_match.breakdown).unwrap_or_else(|_| "{}".to_string());
        let row = NewMatchRow {
            campaign_id: new_match.campaign_id.clone(),
            user1_id: new_match.user1_id.clone(),
            user2_id: new_match.user2_id.clone(),
            compatibility_score: new_match.score,
            match_tier: new_match.tier.to_string(),
            shared_interests,
            is_mutual_crush: new_match.is_mutual_crush,
            rank_for_user1: Some(i64::from(new_match.rank_for_user1)),
            rank_for_user2: Some(i64::from(new_match.rank_for_user2)),
        };
        match_repo::insert_match(&self.pool, &row).await
    }

    async fn update_campaign_stats(
        &self,
        campaign_id: &str,
        participants: usize,
        matches_created: usize,
    ) -> Result<(), sqlx::Error> {
        campaign_repo::update_campaign_stats(
            &self.pool,
            campaign_id,
            participants as i64,
            matches_created as i64,
        )
        .await
    }
}
