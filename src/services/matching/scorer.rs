//! Pairwise compatibility scoring.

use crate::database::models::Category;
use crate::services::matching::similarity::answer_similarity;
use crate::services::matching::types::{
    Answer, Candidate, CandidateProfile, CategoryBreakdown, CompatibilityScore, CrushSignal,
    ScoredPair, NEAR_YEAR_BONUS, NEUTRAL_CATEGORY_SCORE, SAME_PROGRAM_BONUS, SCORE_MAX, SCORE_MIN,
};
use rayon::prelude::*;

/// True when each side's declared preference (if any) admits the other's gender.
pub fn meets_preferences(first: &Candidate, second: &Candidate) -> bool {
    accepts(&first.seeking, &second.gender) && accepts(&second.seeking, &first.gender)
}

// Whole-entry match: "female" must not admit "male".
fn accepts(seeking: &str, gender: &str) -> bool {
    let seeking = seeking.trim().to_lowercase();
    if seeking.is_empty() || seeking == "any" {
        return true;
    }
    let gender = gender.trim().to_lowercase();
    if gender.is_empty() {
        return true;
    }
    seeking
        .split(|c: char| c == ',' || c == '/' || c == '|' || c.is_whitespace())
        .any(|entry| entry == gender)
}

/// Weighted similarity of two answer sets in one category, on a 0–100 scale.
/// Falls back to the neutral midpoint when the sets share no question.
pub fn category_score(first: &[Answer], second: &[Answer], category: Category) -> f64 {
    if first.is_empty() || second.is_empty() {
        return NEUTRAL_CATEGORY_SCORE;
    }

    let mut weight_sum = 0.0;
    let mut weighted = 0.0;
    for answer in first {
        let Some(other) = second.iter().find(|o| o.question_id == answer.question_id) else {
            continue;
        };
        weighted += answer_similarity(answer, other, category) * answer.weight;
        weight_sum += answer.weight;
    }

    if weight_sum == 0.0 {
        return NEUTRAL_CATEGORY_SCORE;
    }
    (weighted / weight_sum) * 100.0
}

pub fn crush_signal(first: &CandidateProfile, second: &CandidateProfile) -> CrushSignal {
    CrushSignal::from_flags(
        first.has_crush_on(&second.candidate),
        second.has_crush_on(&first.candidate),
    )
}

fn tie_break_bonus(first: &Candidate, second: &Candidate) -> f64 {
    let mut bonus = 0.0;
    if let (Some(a), Some(b)) = (first.program.as_deref(), second.program.as_deref()) {
        if !a.is_empty() && a == b {
            bonus += SAME_PROGRAM_BONUS;
        }
    }
    if let (Some(a), Some(b)) = (first.year_level, second.year_level) {
        if (a - b).abs() <= 1 {
            bonus += NEAR_YEAR_BONUS;
        }
    }
    bonus
}

/// Score a pair: preference gate, category aggregation, crush multiplier,
/// tie-break bonuses, clamp.
pub fn calculate_compatibility(
    first: &CandidateProfile,
    second: &CandidateProfile,
) -> CompatibilityScore {
    if !meets_preferences(&first.candidate, &second.candidate) {
        return CompatibilityScore::incompatible();
    }

    let mut breakdown = CategoryBreakdown::default();
    for category in Category::ALL {
        let score = category_score(
            first.answers_in(category),
            second.answers_in(category),
            category,
        );
        breakdown.set(category, score);
    }

    let crush = crush_signal(first, second);
    let score = breakdown.composite() * crush.multiplier()
        + tie_break_bonus(&first.candidate, &second.candidate);

    CompatibilityScore {
        compatible: true,
        score: score.clamp(SCORE_MIN, SCORE_MAX),
        breakdown: breakdown.rounded(),
        is_mutual_crush: crush == CrushSignal::Mutual,
        has_crush: crush != CrushSignal::None,
    }
}

/// Score every unordered pair in a partition. Pairs are produced in
/// generation order `(i, j)` with `i < j`; scoring runs in parallel but the
/// output keeps that order.
pub fn score_pairs(members: &[CandidateProfile]) -> Vec<ScoredPair> {
    let indices: Vec<(usize, usize)> = (0..members.len())
        .flat_map(|i| ((i + 1)..members.len()).map(move |j| (i, j)))
        .collect();

    indices
        .par_iter()
        .map(|&(i, j)| {
            let first = &members[i];
            let second = &members[j];
            ScoredPair {
                user1_id: first.candidate.id.clone(),
                user2_id: second.candidate.id.clone(),
                score: calculate_compatibility(first, second),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/scorer_tests.rs"]
mod tests;
