pub mod campaign_repo;
pub mod crush_repo;
pub mod match_repo;
pub mod message_repo;
pub mod models;
pub mod settings_repo;
pub mod survey_repo;
pub mod user_repo;
