use super::*;
use crate::services::matching::types::{CategoryBreakdown, CompatibilityScore};

fn pair(user1: &str, user2: &str, score: f64, mutual: bool) -> ScoredPair {
    ScoredPair {
        user1_id: user1.into(),
        user2_id: user2.into(),
        score: CompatibilityScore {
            compatible: true,
            score,
            breakdown: CategoryBreakdown::default(),
            is_mutual_crush: mutual,
            has_crush: mutual,
        },
    }
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(MatchTier::from_score(100.0), MatchTier::Perfect);
    assert_eq!(MatchTier::from_score(95.0), MatchTier::Perfect);
    assert_eq!(MatchTier::from_score(94.999), MatchTier::Excellent);
    assert_eq!(MatchTier::from_score(85.0), MatchTier::Excellent);
    assert_eq!(MatchTier::from_score(75.0), MatchTier::Great);
    assert_eq!(MatchTier::from_score(65.0), MatchTier::Good);
    assert_eq!(MatchTier::from_score(64.999), MatchTier::Fair);
    assert_eq!(MatchTier::from_score(0.0).as_str(), "fair");
}

#[test]
fn test_rank_pairs_is_descending_and_stable() {
    let mut pairs = vec![
        pair("a", "b", 60.0, false),
        pair("a", "c", 80.0, false),
        pair("b", "c", 60.0, false),
        pair("c", "d", 60.0, false),
    ];
    rank_pairs(&mut pairs);

    let order: Vec<(&str, &str)> = pairs
        .iter()
        .map(|p| (p.user1_id.as_str(), p.user2_id.as_str()))
        .collect();
    assert_eq!(order, vec![("a", "c"), ("a", "b"), ("b", "c"), ("c", "d")]);
}

#[test]
fn test_threshold_and_mutual_bypass() {
    let admission = Admission::new(7, 50.0, 100);

    assert_eq!(
        admission.evaluate(&pair("a", "b", 49.999, false)),
        Decision::Skip(Rejection::BelowThreshold)
    );
    assert!(matches!(
        admission.evaluate(&pair("a", "b", 50.0, false)),
        Decision::Admit { .. }
    ));
    assert!(matches!(
        admission.evaluate(&pair("a", "b", 12.0, true)),
        Decision::Admit { .. }
    ));
}

#[test]
fn test_incompatible_pairs_never_admitted() {
    let admission = Admission::new(7, 0.0, 100);
    let mut rejected = pair("a", "b", 0.0, false);
    rejected.score = CompatibilityScore::incompatible();

    assert_eq!(
        admission.evaluate(&rejected),
        Decision::Skip(Rejection::Incompatible)
    );
    assert_eq!(
        admission.evaluate(&pair("a", "a", 90.0, false)),
        Decision::Skip(Rejection::Incompatible)
    );
}

#[test]
fn test_ranks_follow_each_side_running_count() {
    let mut admission = Admission::new(7, 50.0, 100);

    let first = pair("a", "b", 90.0, false);
    assert_eq!(
        admission.evaluate(&first),
        Decision::Admit { rank_for_user1: 1, rank_for_user2: 1 }
    );
    admission.record(&first);

    let second = pair("a", "c", 80.0, false);
    assert_eq!(
        admission.evaluate(&second),
        Decision::Admit { rank_for_user1: 2, rank_for_user2: 1 }
    );
    admission.record(&second);

    assert_eq!(admission.count_for("a"), 2);
    assert_eq!(admission.count_for("z"), 0);
    assert_eq!(admission.created(), 2);
}

#[test]
fn test_capacity_blocks_even_mutual_crushes() {
    let mut admission = Admission::new(2, 50.0, 100);
    admission.record(&pair("a", "b", 90.0, false));
    admission.record(&pair("a", "c", 90.0, false));

    assert_eq!(
        admission.evaluate(&pair("a", "d", 99.0, true)),
        Decision::Skip(Rejection::UserAtCapacity)
    );
    assert!(matches!(
        admission.evaluate(&pair("b", "d", 99.0, false)),
        Decision::Admit { .. }
    ));
}

#[test]
fn test_global_cap_exhausts() {
    let mut admission = Admission::new(7, 50.0, 1);
    assert!(!admission.is_exhausted());
    admission.record(&pair("a", "b", 90.0, false));
    assert!(admission.is_exhausted());
}

#[test]
fn test_build_match_carries_tier_and_ranks() {
    let new_match = build_match("c1", &pair("a", "b", 86.0, true), 3, 1);
    assert_eq!(new_match.campaign_id, "c1");
    assert_eq!(new_match.tier, "excellent");
    assert!(new_match.is_mutual_crush);
    assert_eq!((new_match.rank_for_user1, new_match.rank_for_user2), (3, 1));
}
