//! Global ranking and greedy admission under per-user capacity.

use crate::services::matching::types::{NewMatch, ScoredPair};
use std::collections::HashMap;

/// Descriptive label for a final score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Perfect,
    Excellent,
    Great,
    Good,
    Fair,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            MatchTier::Perfect
        } else if score >= 85.0 {
            MatchTier::Excellent
        } else if score >= 75.0 {
            MatchTier::Great
        } else if score >= 65.0 {
            MatchTier::Good
        } else {
            MatchTier::Fair
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Perfect => "perfect",
            MatchTier::Excellent => "excellent",
            MatchTier::Great => "great",
            MatchTier::Good => "good",
            MatchTier::Fair => "fair",
        }
    }
}

/// Stable sort by descending score; equal scores keep generation order.
pub fn rank_pairs(pairs: &mut [ScoredPair]) {
    pairs.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));
}

/// Why a pair was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Incompatible,
    UserAtCapacity,
    BelowThreshold,
}

/// Outcome of evaluating one pair against the current admission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit { rank_for_user1: u32, rank_for_user2: u32 },
    Skip(Rejection),
}

/// Admission state for one generation run. Per-user counts and the global
/// created count span every partition of the run.
#[derive(Debug)]
pub struct Admission {
    max_per_user: u32,
    min_score: f64,
    max_total: usize,
    counts: HashMap<String, u32>,
    created: usize,
}

impl Admission {
    pub fn new(max_per_user: u32, min_score: f64, max_total: usize) -> Self {
        Self {
            max_per_user,
            min_score,
            max_total,
            counts: HashMap::new(),
            created: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.created >= self.max_total
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn count_for(&self, user_id: &str) -> u32 {
        self.counts.get(user_id).copied().unwrap_or(0)
    }

    /// Mutual crushes bypass the score threshold but never the capacity cap.
    pub fn evaluate(&self, pair: &ScoredPair) -> Decision {
        if !pair.score.compatible || pair.user1_id == pair.user2_id {
            return Decision::Skip(Rejection::Incompatible);
        }

        let count1 = self.count_for(&pair.user1_id);
        let count2 = self.count_for(&pair.user2_id);
        if count1 >= self.max_per_user || count2 >= self.max_per_user {
            return Decision::Skip(Rejection::UserAtCapacity);
        }
        if pair.score.score < self.min_score && !pair.score.is_mutual_crush {
            return Decision::Skip(Rejection::BelowThreshold);
        }

        Decision::Admit {
            rank_for_user1: count1 + 1,
            rank_for_user2: count2 + 1,
        }
    }

    /// Count an admitted pair once it has been persisted.
    pub fn record(&mut self, pair: &ScoredPair) {
        *self.counts.entry(pair.user1_id.clone()).or_insert(0) += 1;
        *self.counts.entry(pair.user2_id.clone()).or_insert(0) += 1;
        self.created += 1;
    }
}

/// Build the persistence payload for an admitted pair.
pub fn build_match(
    campaign_id: &str,
    pair: &ScoredPair,
    rank_for_user1: u32,
    rank_for_user2: u32,
) -> NewMatch {
    NewMatch {
        campaign_id: campaign_id.to_string(),
        user1_id: pair.user1_id.clone(),
        user2_id: pair.user2_id.clone(),
        score: pair.score.score,
        tier: MatchTier::from_score(pair.score.score).as_str(),
        breakdown: pair.score.breakdown,
        is_mutual_crush: pair.score.is_mutual_crush,
        rank_for_user1,
        rank_for_user2,
    }
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
