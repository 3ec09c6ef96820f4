use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical survey question categories used by the compatibility scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Demographics,
    Personality,
    Values,
    Lifestyle,
    Interests,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Demographics,
        Category::Personality,
        Category::Values,
        Category::Lifestyle,
        Category::Interests,
    ];

    /// Maps a stored category (including legacy aliases) onto the canonical set.
    /// Returns `None` for categories that never take part in scoring.
    pub fn normalize(raw: &str) -> Option<Category> {
        match raw.trim().to_lowercase().as_str() {
            "demographics" => Some(Category::Demographics),
            "personality" => Some(Category::Personality),
            "values" | "core_values" => Some(Category::Values),
            "lifestyle" => Some(Category::Lifestyle),
            "interests" | "fun" | "academic" => Some(Category::Interests),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Demographics => "demographics",
            Category::Personality => "personality",
            Category::Values => "values",
            Category::Lifestyle => "lifestyle",
            Category::Interests => "interests",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Survey answer payload kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Scale,
    MultipleChoice,
    MultipleSelect,
    Text,
    Ranking,
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerType::Scale => write!(f, "scale"),
            AnswerType::MultipleChoice => write!(f, "multiple_choice"),
            AnswerType::MultipleSelect => write!(f, "multiple_select"),
            AnswerType::Text => write!(f, "text"),
            AnswerType::Ranking => write!(f, "ranking"),
        }
    }
}

impl FromStr for AnswerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scale" => Ok(AnswerType::Scale),
            "multiple_choice" => Ok(AnswerType::MultipleChoice),
            "multiple_select" => Ok(AnswerType::MultipleSelect),
            "text" => Ok(AnswerType::Text),
            "ranking" => Ok(AnswerType::Ranking),
            _ => Err(format!("Unknown answer type: {s}")),
        }
    }
}

/// Row in the `campaigns` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CampaignRow {
    pub id: String,
    pub name: String,
    pub survey_open_date: DateTime<Utc>,
    pub survey_close_date: DateTime<Utc>,
    pub profile_update_start_date: DateTime<Utc>,
    pub profile_update_end_date: DateTime<Utc>,
    pub results_release_date: DateTime<Utc>,
    pub is_active: bool,
    pub total_participants: i64,
    pub total_matches_generated: i64,
}

/// A user eligible for matching (active account, survey completed).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: String,
    pub email: String,
    pub gender: Option<String>,
    pub seeking_gender: Option<String>,
    pub program: Option<String>,
    pub year_level: Option<i64>,
}

/// A survey response joined with its question's category and weight.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnswerRow {
    pub question_id: String,
    pub question_category: String,
    pub question_weight: Option<f64>,
    pub answer_type: String,
    pub answer_text: Option<String>,
    pub answer_value: Option<i64>,
    pub answer_json: Option<String>,
}

/// Row in the `questions` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: String,
    pub campaign_id: Option<String>,
    pub category: String,
    pub question_text: String,
    pub question_type: String,
    pub weight: Option<f64>,
    pub order_index: i64,
}

/// Row in the `crush_lists` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CrushRow {
    pub id: String,
    pub user_id: String,
    pub campaign_id: String,
    pub crush_email: String,
    pub crush_name: Option<String>,
    pub is_mutual: bool,
}

/// Row in the `matches` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchRow {
    pub id: String,
    pub campaign_id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub compatibility_score: f64,
    pub match_tier: String,
    pub shared_interests: String,
    pub is_mutual_crush: bool,
    pub rank_for_user1: Option<i64>,
    pub rank_for_user2: Option<i64>,
    pub is_revealed: bool,
    pub revealed_at: Option<DateTime<Utc>>,
    pub is_mutual_interest: bool,
    pub messaging_unlocked: bool,
}

impl MatchRow {
    pub fn involves(&self, user_id: &str) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    /// The other participant, if `user_id` is one of the pair.
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        if self.user1_id == user_id {
            Some(&self.user2_id)
        } else if self.user2_id == user_id {
            Some(&self.user1_id)
        } else {
            None
        }
    }
}

/// Row in the `messages` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRow {
    pub id: String,
    pub match_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}
