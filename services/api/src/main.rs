use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use yamdb_api::config::ApiConfig;
use yamdb_api::router::build_router;
use yamdb_api::state::AppState;
use yamdb_auth_types::clock::SystemClock;
use yamdb_auth_types::confirmation::ConfirmationCodes;
use yamdb_auth_types::token::TokenIssuer;
use yamdb_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yamdb_core::tracing::init_tracing();

    let config = ApiConfig::from_env().context("failed to load config from environment")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let clock = Arc::new(SystemClock);
    let state = AppState {
        db,
        tokens: TokenIssuer::new(
            config.secret_key.clone(),
            config.access_token_ttl_secs,
            clock.clone(),
        ),
        codes: ConfirmationCodes::new(
            config.secret_key,
            config.confirmation_code_ttl_secs,
            clock,
        ),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("api listening on {addr}");
    axum::serve(listener, router).await.context("server error")
}
