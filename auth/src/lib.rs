//! Authentication primitives shared by the services.
//!
//! - Access tokens: HS256 JWTs with fixed `sub`/`iat`/`exp` claims
//! - Password hashing (Argon2id)
//!
//! Both are pure and perform no I/O; services own lookup and transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Utc;
//!
//! let codec = TokenCodec::with_default_validity(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let token = codec.encode("alice@example.com", now).unwrap();
//! let claims = codec.decode(&token, now).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::DEFAULT_TOKEN_VALIDITY_MINUTES;
pub use password::PasswordError;
pub use password::PasswordHasher;
