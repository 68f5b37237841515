use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth_service::credential::errors::AuthError;
use auth_service::credential::models::CredentialRecord;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::ports::CredentialStore;
use auth_service::domain::credential::service::AuthService;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use broker_service::domain::submission::service::BrokerService;
use broker_service::inbound::http::router::create_router;
use broker_service::outbound::clients::HttpAuthGateway;
use envelope::DEFAULT_MAX_BODY_BYTES;
use tokio::net::TcpListener;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const USER_EMAIL: &str = "user@example.com";
pub const USER_PASSWORD: &str = "verysecret";

/// Single-user credential store for the downstream auth service.
pub struct SingleUserStore {
    records: HashMap<String, CredentialRecord>,
    password_hasher: PasswordHasher,
}

impl SingleUserStore {
    pub fn new() -> Self {
        let password_hasher = PasswordHasher::new();
        let record = CredentialRecord {
            email: EmailAddress::new(USER_EMAIL.to_string()).unwrap(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password_hash: password_hasher
                .hash(USER_PASSWORD)
                .expect("Failed to hash password"),
        };

        Self {
            records: HashMap::from([(USER_EMAIL.to_string(), record)]),
            password_hasher,
        }
    }
}

#[async_trait]
impl CredentialStore for SingleUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, AuthError> {
        Ok(self.records.get(email.as_str()).cloned())
    }

    async fn secret_matches(
        &self,
        record: &CredentialRecord,
        plaintext: &str,
    ) -> Result<bool, AuthError> {
        Ok(self
            .password_hasher
            .verify(plaintext, &record.password_hash)?)
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    format!("http://127.0.0.1:{}", port)
}

/// Spawn a real auth service and return its base URL.
pub async fn spawn_auth_service() -> String {
    let codec = Arc::new(TokenCodec::with_default_validity(JWT_SECRET));
    let auth_service = Arc::new(AuthService::new(Arc::new(SingleUserStore::new()), codec));

    serve(auth_service::inbound::http::router::create_router(
        auth_service,
        DEFAULT_MAX_BODY_BYTES,
    ))
    .await
}

/// Spawn a downstream whose `/authenticate` always answers with `status` and `body`.
pub async fn spawn_canned_auth_service(status: StatusCode, body: serde_json::Value) -> String {
    let router = Router::new().route(
        "/authenticate",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    serve(router).await
}

/// Test broker wired to a downstream auth service at `auth_service_url`
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub auth_service_url: String,
}

impl TestApp {
    pub async fn spawn(auth_service_url: String) -> Self {
        let gateway = Arc::new(HttpAuthGateway::new(&auth_service_url));
        let broker_service = Arc::new(BrokerService::new(gateway));
        let address = serve(create_router(broker_service, DEFAULT_MAX_BODY_BYTES)).await;

        Self {
            address,
            api_client: reqwest::Client::new(),
            auth_service_url,
        }
    }

    /// Broker in front of a real auth service
    pub async fn spawn_with_auth_service() -> Self {
        Self::spawn(spawn_auth_service().await).await
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

/// Base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    format!("http://127.0.0.1:{}", port)
}
