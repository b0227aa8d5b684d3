//! Credential verification and token issuance.
//!
//! Provides the security core shared by the auth service's adapters:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded identity tokens (HS256 JWT, access and refresh kinds)
//! - Authentication coordination
//!
//! Everything here is synchronous and holds no mutable state, so one
//! `Authenticator` can be shared across threads behind an `Arc`.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Identity, JwtHandler, SigningSecret};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret);
//! let identity = Identity::new(1, "alice@example.com", "user");
//! let (token, _expires_at) = handler.issue_access(&identity).unwrap();
//! let claims = handler.decode_verify(&token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, SigningSecret, TokenKind};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token pair
//! let identity = Identity::new(1, "alice@example.com", "user");
//! let pair = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&pair.access_token, TokenKind::Access).unwrap();
//! assert_eq!(decoded, identity);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::ManualClock;
pub use jwt::SigningSecret;
pub use jwt::SystemClock;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
