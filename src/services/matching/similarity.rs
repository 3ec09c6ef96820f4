//! Per-question similarity kernels. Every kernel returns a value in `[0, 1]`.

use crate::database::models::{AnswerType, Category};
use crate::services::matching::types::{Answer, GAUSSIAN_SIGMA, LINEAR_RANGE, NEUTRAL_SIMILARITY};
use std::collections::HashSet;

/// Similarity of two answers to the same question, dispatched on the first
/// answer's type. Missing or unknown data scores neutrally.
pub fn answer_similarity(left: &Answer, right: &Answer, category: Category) -> f64 {
    match left.answer_type {
        Some(AnswerType::Scale) | Some(AnswerType::Ranking) => {
            let (Some(a), Some(b)) = (left.value, right.value) else {
                return NEUTRAL_SIMILARITY;
            };
            match category {
                Category::Personality | Category::Values => gaussian_similarity(a, b, GAUSSIAN_SIGMA),
                _ => inverse_distance(a, b, LINEAR_RANGE),
            }
        }
        Some(AnswerType::MultipleChoice) => exact_match(
            left.text.as_deref().unwrap_or_default(),
            right.text.as_deref().unwrap_or_default(),
        ),
        Some(AnswerType::MultipleSelect) => jaccard_similarity(&left.selections, &right.selections),
        Some(AnswerType::Text) | None => NEUTRAL_SIMILARITY,
    }
}

/// `exp(-Δ² / 2σ²)`: steep near zero, tolerant of small gaps.
pub fn gaussian_similarity(a: f64, b: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 {
        return if a == b { 1.0 } else { 0.0 };
    }
    let diff = (a - b).abs();
    (-(diff * diff) / (2.0 * sigma * sigma)).exp()
}

/// `1 - |Δ| / range`, floored at zero for values outside the expected range.
pub fn inverse_distance(a: f64, b: f64, range: f64) -> f64 {
    if range == 0.0 {
        return NEUTRAL_SIMILARITY;
    }
    (1.0 - (a - b).abs() / range).max(0.0)
}

pub fn exact_match(a: &str, b: &str) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

/// Jaccard index over the distinct entries of both lists; 0 when either is empty.
pub fn jaccard_similarity(left: &[String], right: &[String]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();

    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Parse a multiple-select payload (a JSON array of strings).
/// Anything malformed degrades to an empty selection.
pub fn parse_selection_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("Ignoring malformed multiple-select payload: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/similarity_tests.rs"]
mod tests;
