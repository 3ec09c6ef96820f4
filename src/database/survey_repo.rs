use crate::database::models::{AnswerRow, QuestionRow};
use sqlx::SqlitePool;

/// A user's answers for one campaign, joined with question category and weight.
pub async fn list_answers_for_user_campaign(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<Vec<AnswerRow>, sqlx::Error> {
    sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT sr.question_id,
               q.category      AS question_category,
               q.weight        AS question_weight,
               sr.answer_type,
               sr.answer_text,
               sr.answer_value,
               sr.answer_json
        FROM survey_responses sr
        JOIN questions q ON q.id = sr.question_id
        WHERE sr.user_id = ? AND sr.campaign_id = ?
        ORDER BY q.order_index, sr.question_id
        "#,
    )
    .bind(user_id)
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

/// Active questions for a campaign, including campaign-less (global) questions.
pub async fn list_questions(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<QuestionRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionRow>(
        "SELECT id, campaign_id, category, question_text, question_type, weight, order_index
         FROM questions
         WHERE is_active = 1 AND (campaign_id = ? OR campaign_id IS NULL)
         ORDER BY order_index, id",
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await
}

pub async fn get_question(
    pool: &SqlitePool,
    question_id: &str,
) -> Result<Option<QuestionRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionRow>(
        "SELECT id, campaign_id, category, question_text, question_type, weight, order_index
         FROM questions WHERE id = ?",
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_question(pool: &SqlitePool, question: &QuestionRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO questions (id, campaign_id, category, question_text, question_type, weight, order_index)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&question.id)
    .bind(&question.campaign_id)
    .bind(&question.category)
    .bind(&question.question_text)
    .bind(&question.question_type)
    .bind(question.weight)
    .bind(question.order_index)
    .execute(pool)
    .await?;
    Ok(())
}

/// Answer payload as submitted by a user.
#[derive(Debug, Clone, Default)]
pub struct NewAnswer {
    pub user_id: String,
    pub campaign_id: String,
    pub question_id: String,
    pub answer_type: String,
    pub answer_text: Option<String>,
    pub answer_value: Option<i64>,
    pub answer_json: Option<String>,
}

/// Insert or overwrite the single answer a user may hold per question per campaign.
pub async fn upsert_answer(pool: &SqlitePool, answer: &NewAnswer) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO survey_responses
            (id, user_id, campaign_id, question_id, answer_text, answer_value, answer_json, answer_type)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, campaign_id, question_id) DO UPDATE SET
            answer_text = excluded.answer_text,
            answer_value = excluded.answer_value,
            answer_json = excluded.answer_json,
            answer_type = excluded.answer_type
        "#,
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(&answer.user_id)
    .bind(&answer.campaign_id)
    .bind(&answer.question_id)
    .bind(&answer.answer_text)
    .bind(answer.answer_value)
    .bind(&answer.answer_json)
    .bind(&answer.answer_type)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count_answers(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM survey_responses WHERE user_id = ? AND campaign_id = ?",
    )
    .bind(user_id)
    .bind(campaign_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

#[cfg(test)]
#[path = "tests/survey_repo_test.rs"]
mod tests;
