use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub mod commands;
pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

use commands::admin_cmds::generate_matches_cmd;
use commands::AppState;
use services::config::AppConfig;

/// Open (creating if needed) the database and apply migrations.
pub async fn connect(app_config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&app_config.database_url)
        .with_context(|| format!("Invalid DATABASE_URL: {}", app_config.database_url))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(app_config.max_connections.max(1))
        .connect_with(opts)
        .await
        .context("Failed to connect to database")?;

    // Run standard sqlx migrations (compiled into the binary)
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// Entry point for the admin binary: one generation run for the active campaign.
pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = AppConfig::from_env();
    log::info!("Using database {}", app_config.database_url);

    let pool = connect(&app_config).await?;
    let state = AppState::new(pool, app_config).await;

    let summary =
        generate_matches_cmd(&state.pool, &state.lock, state.config.matching_settings()).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    state.pool.close().await;
    Ok(())
}
