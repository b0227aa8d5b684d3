use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningSecret;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// This is the single place token verification happens: the HTTP gate, the
/// refresh exchange and gRPC introspection all call [`Authenticator::validate_token`].
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,
    /// JWT refresh token
    pub refresh_token: String,
    /// Access token expiry (Unix timestamp, seconds)
    pub expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default token lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for JWT signing
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_handler(JwtHandler::new(secret))
    }

    /// Create an authenticator around a preconfigured token handler.
    pub fn with_handler(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and issue a token pair.
    ///
    /// Performs exactly one hash comparison.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity the tokens will speak for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(identity)?)
    }

    /// Issue a fresh access/refresh pair without password verification.
    ///
    /// Used by the refresh exchange once the refresh token has been verified.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_tokens(&self, identity: &Identity) -> Result<TokenPair, JwtError> {
        let (access_token, expires_at) = self.jwt_handler.issue_access(identity)?;
        let refresh_token = self.jwt_handler.issue_refresh(identity)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Validate a token of the given kind and return the identity it carries.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, mis-signed, expired or of the wrong kind
    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<Identity, JwtError> {
        self.jwt_handler
            .decode_expecting(token, kind)
            .map(Identity::from)
    }
}
