//! Compatibility matching engine.
//!
//! A run for one campaign is a three-phase batch job:
//! 1. load every eligible candidate with answers and crush declarations,
//! 2. bucket by gender/seeking preference and score all pairs inside a bucket,
//! 3. rank pairs by score and greedily admit them under the per-user cap.
//!
//! The previous match set for the campaign is deleted before admission, so
//! re-running is the recovery path for any failed run. Callers must serialize
//! runs for the same campaign (see [`crate::services::core::generation_lock`]).

pub mod partition;
pub mod scorer;
pub mod selector;
pub mod similarity;
pub mod store;
pub mod types;

use crate::services::config::MatchingSettings;
use partition::partition_candidates;
use scorer::score_pairs;
use selector::{build_match, rank_pairs, Admission, Decision};
use store::MatchStore;
use thiserror::Error;
use types::{CandidateProfile, GenerationSummary};

#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Failed to load eligible candidates: {0}")]
    Eligibility(#[source] sqlx::Error),

    #[error("Failed to load survey data for {candidate_id}: {source}")]
    Profile {
        candidate_id: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to clear previous matches: {0}")]
    Delete(#[source] sqlx::Error),

    #[error("Scoring worker failed: {0}")]
    Scoring(#[source] tokio::task::JoinError),

    #[error("Failed to update campaign stats after creating {matches_created} matches: {source}")]
    Stats {
        matches_created: usize,
        #[source]
        source: sqlx::Error,
    },
}

pub struct MatchingService<S: MatchStore> {
    store: S,
    settings: MatchingSettings,
}

impl<S: MatchStore> MatchingService<S> {
    pub fn new(store: S, settings: MatchingSettings) -> Self {
        Self { store, settings }
    }

    /// Replace the campaign's match set with a freshly generated one.
    pub async fn generate_all_matches(
        &self,
        campaign_id: &str,
    ) -> Result<GenerationSummary, MatchingError> {
        let candidates = self
            .store
            .list_eligible_candidates(campaign_id)
            .await
            .map_err(MatchingError::Eligibility)?;
        let total_users = candidates.len();

        let mut profiles = Vec::with_capacity(total_users);
        for candidate in candidates {
            let answers = self
                .store
                .list_answers(&candidate.id, campaign_id)
                .await
                .map_err(|source| MatchingError::Profile {
                    candidate_id: candidate.id.clone(),
                    source,
                })?;
            let crushes = self
                .store
                .list_crush_emails(&candidate.id, campaign_id)
                .await
                .map_err(|source| MatchingError::Profile {
                    candidate_id: candidate.id.clone(),
                    source,
                })?;
            profiles.push(CandidateProfile::new(candidate, answers, crushes));
        }

        let removed = self
            .store
            .delete_matches(campaign_id)
            .await
            .map_err(MatchingError::Delete)?;

        let partitions = partition_candidates(profiles);
        let partition_count = partitions.len();
        log::info!(
            "Generating matches for campaign {campaign_id}: {total_users} candidates in {partition_count} partitions ({removed} previous matches removed)"
        );

        let mut admission = Admission::new(
            self.settings.max_matches_per_user,
            self.settings.min_score,
            self.settings.max_total_matches,
        );
        let mut failed_inserts = 0usize;

        'partitions: for partition in partitions {
            let key = partition.key;
            let members = partition.members;
            let member_count = members.len();

            // O(k^2) pair scoring stays off the async workers.
            let scored = tokio::task::spawn_blocking(move || {
                let mut scored = score_pairs(&members);
                rank_pairs(&mut scored);
                scored
            })
            .await
            .map_err(MatchingError::Scoring)?;
            log::debug!(
                "Partition '{key}': {member_count} members, {} pairs",
                scored.len()
            );

            for pair in &scored {
                if admission.is_exhausted() {
                    log::warn!(
                        "Global match cap of {} reached; stopping generation",
                        self.settings.max_total_matches
                    );
                    break 'partitions;
                }

                let Decision::Admit {
                    rank_for_user1,
                    rank_for_user2,
                } = admission.evaluate(pair)
                else {
                    continue;
                };

                let new_match = build_match(campaign_id, pair, rank_for_user1, rank_for_user2);
                match self.store.create_match(&new_match).await {
                    Ok(_) => admission.record(pair),
                    Err(e) => {
                        failed_inserts += 1;
                        log::warn!(
                            "Skipping match {} <-> {}: insert failed: {e}",
                            pair.user1_id,
                            pair.user2_id
                        );
                    }
                }
            }
        }

        let matches_created = admission.created();
        self.store
            .update_campaign_stats(campaign_id, total_users, matches_created)
            .await
            .map_err(|source| MatchingError::Stats {
                matches_created,
                source,
            })?;

        log::info!(
            "Campaign {campaign_id}: created {matches_created} matches for {total_users} candidates ({failed_inserts} failed inserts)"
        );

        Ok(GenerationSummary {
            campaign_id: campaign_id.to_string(),
            matches_created,
            total_users,
            partitions: partition_count,
            failed_inserts,
        })
    }
}

#[cfg(test)]
#[path = "tests/generation_tests.rs"]
mod tests;
