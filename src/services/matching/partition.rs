//! Coarse gender / seeking-preference bucketing.
//!
//! Only candidates sharing a bucket are ever scored against each other, which
//! bounds the pairwise pass to O(k²) per bucket. The authoritative
//! compatibility check is the preference gate in the scorer.

use crate::services::matching::types::CandidateProfile;
use std::collections::BTreeMap;

pub const ANY_GROUP: &str = "any";

pub fn group_key(gender: &str, seeking: &str) -> String {
    let seeking = seeking.trim().to_lowercase();
    if seeking.is_empty() || seeking == ANY_GROUP {
        return ANY_GROUP.to_string();
    }
    format!("{}_{}", gender.trim().to_lowercase(), seeking)
}

/// A bucket of profiles in their original (load) order.
#[derive(Debug)]
pub struct Partition {
    pub key: String,
    pub members: Vec<CandidateProfile>,
}

/// Buckets profiles by group key. Buckets come back sorted by key so runs are
/// reproducible; member order within a bucket follows the input.
pub fn partition_candidates(profiles: Vec<CandidateProfile>) -> Vec<Partition> {
    let mut groups: BTreeMap<String, Vec<CandidateProfile>> = BTreeMap::new();
    for profile in profiles {
        let key = group_key(&profile.candidate.gender, &profile.candidate.seeking);
        groups.entry(key).or_default().push(profile);
    }

    groups
        .into_iter()
        .map(|(key, members)| Partition { key, members })
        .collect()
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
