#![allow(dead_code)]

use campus_match_lib::database::models::{CampaignRow, QuestionRow};
use campus_match_lib::database::{campaign_repo, survey_repo, user_repo};
use campus_match_lib::services::config::AppConfig;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: SqlitePool,
    pub config: AppConfig,
    // Keeps the database file alive for the test's duration
    _dir: TempDir,
}

/// File-backed database created through the same path as the binary.
pub async fn init_file_db() -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig {
        database_url: format!("sqlite://{}", dir.path().join("campus.db").display()),
        max_connections: 2,
        match_on_survey_complete: false,
    };
    let pool = campus_match_lib::connect(&config)
        .await
        .expect("Failed to open test database");

    TestContext {
        pool,
        config,
        _dir: dir,
    }
}

pub async fn seed_open_campaign(pool: &SqlitePool, id: &str) {
    let now = Utc::now();
    let campaign = CampaignRow {
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
    };
    campaign_repo::insert_campaign(pool, &campaign)
        .await
        .expect("insert campaign");
}

/// Registered user who has not finished the survey yet.
pub async fn seed_registrant(pool: &SqlitePool, id: &str, gender: &str, seeking: &str, program: &str) {
    user_repo::insert_user(
        pool,
        &user_repo::NewUser {
            id: id.into(),
            email: format!("{id}@campus.test"),
            gender: Some(gender.into()),
            seeking_gender: Some(seeking.into()),
            program: Some(program.into()),
            year_level: Some(2),
            survey_completed: false,
        },
    )
    .await
    .expect("insert user");
}

pub async fn seed_question(pool: &SqlitePool, id: &str, category: &str, question_type: &str, order: i64) {
    survey_repo::insert_question(
        pool,
        &QuestionRow {
            id: id.into(),
            campaign_id: None,
            category: category.into(),
            question_text: format!("Question {id}"),
            question_type: question_type.into(),
            weight: Some(1.0),
            order_index: order,
        },
    )
    .await
    .expect("insert question");
}
