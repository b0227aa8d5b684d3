use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// The hashing primitive itself failed (e.g. no entropy for the salt).
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored value is not a PHC string produced by this hasher.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
