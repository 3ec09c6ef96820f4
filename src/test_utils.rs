use crate::database::campaign_repo::insert_campaign;
use crate::database::models::{AnswerType, CampaignRow, Category, QuestionRow};
use crate::database::survey_repo::{insert_question, upsert_answer, NewAnswer};
use crate::database::user_repo::{insert_user, NewUser};
use crate::services::matching::types::{Answer, Candidate, CandidateProfile};
use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::sync::Once;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });

    // Create an in-memory database for each test
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // Single connection to avoid locking issues in tests
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    TestContext { pool }
}

/// Campaign whose survey window is currently open.
pub fn open_campaign(id: &str) -> CampaignRow {
    let now = Utc::now();
    CampaignRow {
        id: id.into(),
        name: format!("Campaign {id}"),
        survey_open_date: now - Duration::days(1),
        survey_close_date: now + Duration::days(7),
        profile_update_start_date: now + Duration::days(8),
        profile_update_end_date: now + Duration::days(10),
        results_release_date: now + Duration::days(11),
        is_active: true,
        total_participants: 0,
        total_matches_generated: 0,
    }
}

pub async fn seed_campaign(pool: &SqlitePool, id: &str) -> CampaignRow {
    let campaign = open_campaign(id);
    insert_campaign(pool, &campaign).await.expect("insert campaign");
    campaign
}

pub async fn seed_user(pool: &SqlitePool, id: &str, gender: &str, seeking: &str) {
    insert_user(
        pool,
        &NewUser {
            id: id.into(),
            email: format!("{id}@campus.test"),
            gender: Some(gender.into()),
            seeking_gender: Some(seeking.into()),
            program: None,
            year_level: None,
            survey_completed: true,
        },
    )
    .await
    .expect("insert user");
}

pub async fn seed_question(
    pool: &SqlitePool,
    id: &str,
    campaign_id: &str,
    category: &str,
    question_type: &str,
    weight: Option<f64>,
) {
    insert_question(
        pool,
        &QuestionRow {
            id: id.into(),
            campaign_id: Some(campaign_id.into()),
            category: category.into(),
            question_text: format!("Question {id}"),
            question_type: question_type.into(),
            weight,
            order_index: 0,
        },
    )
    .await
    .expect("insert question");
}

pub async fn seed_scale_answer(
    pool: &SqlitePool,
    user_id: &str,
    campaign_id: &str,
    question_id: &str,
    value: i64,
) {
    upsert_answer(
        pool,
        &NewAnswer {
            user_id: user_id.into(),
            campaign_id: campaign_id.into(),
            question_id: question_id.into(),
            answer_type: "scale".into(),
            answer_value: Some(value),
            ..Default::default()
        },
    )
    .await
    .expect("insert answer");
}

pub fn candidate(id: &str, gender: &str, seeking: &str) -> Candidate {
    Candidate {
        id: id.into(),
        email: format!("{id}@campus.test"),
        gender: gender.into(),
        seeking: seeking.into(),
        program: None,
        year_level: None,
    }
}

pub fn scale_answer(question_id: &str, category: Category, value: f64) -> Answer {
    Answer {
        question_id: question_id.into(),
        category: Some(category),
        weight: 1.0,
        answer_type: Some(AnswerType::Scale),
        value: Some(value),
        text: None,
        selections: Vec::new(),
    }
}

/// Profile answering every question in `answers` with no crush declarations.
pub fn profile(candidate: Candidate, answers: Vec<Answer>) -> CandidateProfile {
    CandidateProfile::new(candidate, answers, Vec::new())
}

/// One scale answer per canonical category, all with the same value.
pub fn uniform_answers(value: f64) -> Vec<Answer> {
    Category::ALL
        .iter()
        .map(|c| scale_answer(&format!("q_{c}"), *c, value))
        .collect()
}
