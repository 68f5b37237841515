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
use auth_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "verysecret";

/// Credential store backed by a map, provisioned before the server starts.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: HashMap<String, CredentialRecord>,
    password_hasher: PasswordHasher,
}

impl InMemoryCredentialStore {
    pub fn with_user(mut self, email: &str, first_name: &str, last_name: &str, password: &str) -> Self {
        let password_hash = self
            .password_hasher
            .hash(password)
            .expect("Failed to hash password");

        self.records.insert(
            email.to_string(),
            CredentialRecord {
                email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
            },
        );
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
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

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application with one provisioned user
    pub async fn spawn() -> Self {
        Self::spawn_with_limit(envelope::DEFAULT_MAX_BODY_BYTES).await
    }

    pub async fn spawn_with_limit(max_body_bytes: usize) -> Self {
        let store = InMemoryCredentialStore::default().with_user(
            ADMIN_EMAIL,
            "Admin",
            "User",
            ADMIN_PASSWORD,
        );

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let codec = Arc::new(TokenCodec::with_default_validity(JWT_SECRET));
        let auth_service = Arc::new(AuthService::new(Arc::new(store), codec));
        let router = create_router(auth_service, max_body_bytes);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::with_default_validity(JWT_SECRET),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
