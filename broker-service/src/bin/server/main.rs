use std::sync::Arc;

use broker_service::config::Config;
use broker_service::domain::submission::service::BrokerService;
use broker_service::inbound::http::router::create_router;
use broker_service::outbound::clients::HttpAuthGateway;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "broker_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "broker-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_body_bytes = config.server.max_body_bytes,
        auth_service_url = %config.auth_service.url,
        "Configuration loaded"
    );

    let auth_gateway = Arc::new(HttpAuthGateway::new(&config.auth_service.url));
    let broker_service = Arc::new(BrokerService::new(auth_gateway));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(broker_service, config.server.max_body_bytes);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
