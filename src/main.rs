mod app;
mod config;
mod error;
mod state;
mod users;

use crate::{config::AppConfig, state::AppState, users::services::seed_sample_users};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userbase=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let app_state = AppState::init(config);

    if app_state.config.seed_sample_users {
        seed_sample_users(app_state.users.as_ref()).await?;
    }

    app::serve(app_state).await
}
