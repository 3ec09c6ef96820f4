use crate::database::models::{AnswerRow, AnswerType, CandidateRow, Category};
use crate::services::matching::similarity::parse_selection_list;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const MAX_MATCHES_PER_USER: u32 = 7;
pub const MIN_MATCH_SCORE: f64 = 50.0;
pub const MAX_TOTAL_MATCHES: usize = 10_000;

pub const NEUTRAL_CATEGORY_SCORE: f64 = 50.0;
pub const NEUTRAL_SIMILARITY: f64 = 0.5;
pub const GAUSSIAN_SIGMA: f64 = 1.5;
pub const LINEAR_RANGE: f64 = 10.0;

pub const MUTUAL_CRUSH_MULTIPLIER: f64 = 1.20;
pub const ONE_SIDED_CRUSH_MULTIPLIER: f64 = 1.10;
pub const SAME_PROGRAM_BONUS: f64 = 2.0;
pub const NEAR_YEAR_BONUS: f64 = 1.0;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Fixed contribution of each category to the composite score (sums to 1.0).
pub fn category_weight(category: Category) -> f64 {
    match category {
        Category::Demographics => 0.10,
        Category::Personality => 0.30,
        Category::Values => 0.25,
        Category::Lifestyle => 0.20,
        Category::Interests => 0.15,
    }
}

/// A user taking part in one matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub email: String,
    pub gender: String,
    pub seeking: String,
    pub program: Option<String>,
    pub year_level: Option<i64>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            email: row.email.trim().to_lowercase(),
            gender: row.gender.unwrap_or_default(),
            seeking: row.seeking_gender.unwrap_or_default(),
            program: row.program,
            year_level: row.year_level,
        }
    }
}

/// One survey answer with the scoring metadata inherited from its question.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub question_id: String,
    /// `None` when the question's category is outside the canonical five.
    pub category: Option<Category>,
    /// Question weight; unset or zero weights are stored as 1.
    pub weight: f64,
    /// `None` for answer types the scorer does not know.
    pub answer_type: Option<AnswerType>,
    pub value: Option<f64>,
    pub text: Option<String>,
    pub selections: Vec<String>,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        let weight = match row.question_weight {
            Some(w) if w != 0.0 => w,
            _ => 1.0,
        };
        let selections = parse_selection_list(row.answer_json.as_deref());
        Self {
            question_id: row.question_id,
            category: Category::normalize(&row.question_category),
            weight,
            answer_type: row.answer_type.parse().ok(),
            value: row.answer_value.map(|v| v as f64),
            text: row.answer_text,
            selections,
        }
    }
}

/// A candidate with their answers and crush declarations loaded for the run.
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub candidate: Candidate,
    pub answers: HashMap<Category, Vec<Answer>>,
    pub crush_emails: HashSet<String>,
}

impl CandidateProfile {
    pub fn new(candidate: Candidate, answers: Vec<Answer>, crush_emails: Vec<String>) -> Self {
        let mut grouped: HashMap<Category, Vec<Answer>> = HashMap::new();
        for answer in answers {
            if let Some(category) = answer.category {
                grouped.entry(category).or_default().push(answer);
            }
        }
        Self {
            candidate,
            answers: grouped,
            crush_emails: crush_emails
                .into_iter()
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    pub fn answers_in(&self, category: Category) -> &[Answer] {
        self.answers.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_crush_on(&self, other: &Candidate) -> bool {
        !other.email.is_empty() && self.crush_emails.contains(&other.email)
    }
}

/// Per-category sub-scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub demographics: f64,
    pub personality: f64,
    pub values: f64,
    pub lifestyle: f64,
    pub interests: f64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Demographics => self.demographics,
            Category::Personality => self.personality,
            Category::Values => self.values,
            Category::Lifestyle => self.lifestyle,
            Category::Interests => self.interests,
        }
    }

    pub fn set(&mut self, category: Category, score: f64) {
        match category {
            Category::Demographics => self.demographics = score,
            Category::Personality => self.personality = score,
            Category::Values => self.values = score,
            Category::Lifestyle => self.lifestyle = score,
            Category::Interests => self.interests = score,
        }
    }

    /// `Σ(category_score × category_weight)`.
    pub fn composite(&self) -> f64 {
        Category::ALL
            .iter()
            .map(|c| self.get(*c) * category_weight(*c))
            .sum()
    }

    pub fn rounded(&self) -> Self {
        Self {
            demographics: self.demographics.round(),
            personality: self.personality.round(),
            values: self.values.round(),
            lifestyle: self.lifestyle.round(),
            interests: self.interests.round(),
        }
    }

    pub fn is_zero(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c) == 0.0)
    }
}

/// Declared romantic interest between the two sides of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrushSignal {
    None,
    OneSided,
    Mutual,
}

impl CrushSignal {
    pub fn from_flags(first_to_second: bool, second_to_first: bool) -> Self {
        match (first_to_second, second_to_first) {
            (true, true) => CrushSignal::Mutual,
            (true, false) | (false, true) => CrushSignal::OneSided,
            (false, false) => CrushSignal::None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            CrushSignal::Mutual => MUTUAL_CRUSH_MULTIPLIER,
            CrushSignal::OneSided => ONE_SIDED_CRUSH_MULTIPLIER,
            CrushSignal::None => 1.0,
        }
    }
}

/// Result of scoring one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityScore {
    /// False when the preference gate rejected the pair.
    pub compatible: bool,
    pub score: f64,
    /// Rounded category sub-scores.
    pub breakdown: CategoryBreakdown,
    pub is_mutual_crush: bool,
    pub has_crush: bool,
}

impl CompatibilityScore {
    pub fn incompatible() -> Self {
        Self {
            compatible: false,
            score: 0.0,
            breakdown: CategoryBreakdown::default(),
            is_mutual_crush: false,
            has_crush: false,
        }
    }
}

/// A scored candidate pair. `user1` always precedes `user2` in partition order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub user1_id: String,
    pub user2_id: String,
    pub score: CompatibilityScore,
}

/// A pair the selector admitted, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub campaign_id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub score: f64,
    pub tier: &'static str,
    pub breakdown: CategoryBreakdown,
    pub is_mutual_crush: bool,
    pub rank_for_user1: u32,
    pub rank_for_user2: u32,
}

/// Aggregate outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub campaign_id: String,
    pub matches_created: usize,
    pub total_users: usize,
    pub partitions: usize,
    pub failed_inserts: usize,
}
