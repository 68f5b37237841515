use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::credential::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_BACKOFF: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_body_bytes = config.server.max_body_bytes,
        token_validity_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    if config.jwt.secret.is_empty() {
        tracing::warn!("JWT secret is empty, every login will fail to issue a token");
    }

    let pg_pool = connect_with_retry(&config.database.url).await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let codec = Arc::new(TokenCodec::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    ));
    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(credential_store, codec));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, config.server.max_body_bytes);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}

/// Postgres may still be starting when the service comes up.
async fn connect_with_retry(url: &str) -> Result<PgPool, anyhow::Error> {
    let mut attempt = 1;

    loop {
        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => {
                tracing::info!(
                    max_connections = 5,
                    database = "postgresql",
                    attempt,
                    "Database connection pool created"
                );
                return Ok(pool);
            }
            Err(e) if attempt < MAX_CONNECT_ATTEMPTS => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    backoff_secs = CONNECT_BACKOFF.as_secs(),
                    "Postgres not yet ready"
                );
                attempt += 1;
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
            Err(e) => {
                return Err(e).context(format!(
                    "could not connect to Postgres after {} attempts",
                    MAX_CONNECT_ATTEMPTS
                ));
            }
        }
    }
}
