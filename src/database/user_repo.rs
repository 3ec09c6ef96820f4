use crate::database::models::CandidateRow;
use sqlx::SqlitePool;

/// Users taking part in matching: active accounts that finished the survey.
/// Ordered by creation so pair generation is reproducible between runs.
pub async fn list_eligible_candidates(pool: &SqlitePool) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(
        "SELECT id, email, gender, seeking_gender, program, year_level
         FROM users
         WHERE is_active = 1 AND survey_completed = 1
         ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_user_email(pool: &SqlitePool, user_id: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT email FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn set_survey_completed(
    pool: &SqlitePool,
    user_id: &str,
    completed: bool,
) -> Result<(), sqlx::Error> {
    let result = sqlx::query("UPDATE users SET survey_completed = ? WHERE id = ?")
        .bind(completed)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

/// Profile fields written by the account layer; used by seeding and tests.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub gender: Option<String>,
    pub seeking_gender: Option<String>,
    pub program: Option<String>,
    pub year_level: Option<i64>,
    pub survey_completed: bool,
}

pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, email, gender, seeking_gender, program, year_level, survey_completed)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(user.email.trim().to_lowercase())
    .bind(&user.gender)
    .bind(&user.seeking_gender)
    .bind(&user.program)
    .bind(user.year_level)
    .bind(user.survey_completed)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/user_repo_test.rs"]
mod tests;
