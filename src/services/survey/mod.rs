use crate::database::models::AnswerType;
use crate::database::survey_repo::{self, NewAnswer};
use crate::database::user_repo;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Please complete all questions ({answered}/{total} answered)")]
    Incomplete { answered: i64, total: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One answer as submitted. `answer_type` defaults to the question's type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerInput {
    pub question_id: String,
    #[serde(default)]
    pub answer_type: Option<String>,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub answer_value: Option<i64>,
    #[serde(default)]
    pub selections: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyProgress {
    pub total: i64,
    pub answered: i64,
    pub percentage: i64,
}

pub async fn submit_answer(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
    input: &AnswerInput,
) -> Result<(), SurveyError> {
    let question = survey_repo::get_question(pool, &input.question_id)
        .await?
        .ok_or_else(|| SurveyError::QuestionNotFound(input.question_id.clone()))?;

    let answer_type = input
        .answer_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&question.question_type)
        .to_string();
    if answer_type.parse::<AnswerType>().is_err() {
        // Stored as-is; the scorer treats unknown types as neutral.
        log::warn!(
            "Unknown answer type '{answer_type}' for question {}",
            question.id
        );
    }

    let answer_json = match &input.selections {
        Some(selections) => Some(
            serde_json::to_string(selections).map_err(|e| sqlx::Error::Encode(Box::new(e)))?,
        ),
        None => None,
    };

    survey_repo::upsert_answer(
        pool,
        &NewAnswer {
            user_id: user_id.to_string(),
            campaign_id: campaign_id.to_string(),
            question_id: question.id,
            answer_type,
            answer_text: input.answer_text.clone(),
            answer_value: input.answer_value,
            answer_json,
        },
    )
    .await?;
    Ok(())
}

pub async fn survey_progress(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<SurveyProgress, SurveyError> {
    let total = survey_repo::list_questions(pool, campaign_id).await?.len() as i64;
    let answered = survey_repo::count_answers(pool, user_id, campaign_id).await?;
    let percentage = if total > 0 { answered * 100 / total } else { 0 };
    Ok(SurveyProgress {
        total,
        answered,
        percentage,
    })
}

/// Mark the survey complete once every active question has an answer.
pub async fn complete_survey(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<(), SurveyError> {
    let progress = survey_progress(pool, user_id, campaign_id).await?;
    if progress.total > 0 && progress.answered < progress.total {
        return Err(SurveyError::Incomplete {
            answered: progress.answered,
            total: progress.total,
        });
    }

    user_repo::set_survey_completed(pool, user_id, true)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => SurveyError::UserNotFound(user_id.to_string()),
            other => SurveyError::Database(other),
        })?;

    log::info!("User {user_id} completed the survey for campaign {campaign_id}");
    Ok(())
}

#[cfg(test)]
#[path = "tests/survey_tests.rs"]
mod tests;
