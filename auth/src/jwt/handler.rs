use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::claims::TokenKind;
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::JwtError;
use super::secret::SigningSecret;

/// Default lifetime of an access token.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Default lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// JWT token handler for issuing and verifying identity tokens.
///
/// Uses HS256 (HMAC with SHA-256) with the injected signing secret. Every
/// decode checks both the signature and the expiry; there is no unverified
/// decode path.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing and verifying tokens
    ///
    /// # Returns
    /// JwtHandler using the system clock, a 15 minute access lifetime and a
    /// 7 day refresh lifetime
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            clock: Arc::new(SystemClock),
            access_ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Replace the time source used for issuance and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the token lifetimes.
    pub fn with_lifetimes(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Issue an access token for `identity`.
    ///
    /// # Returns
    /// The signed token and its absolute expiry as a Unix timestamp
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or the expiry is out of range
    pub fn issue_access(&self, identity: &Identity) -> Result<(String, i64), JwtError> {
        let expires_at = self.expiry_after(self.access_ttl)?;
        let token = self.encode(&Claims::new(identity, TokenKind::Access, expires_at))?;
        Ok((token, expires_at))
    }

    /// Issue a refresh token for `identity`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or the expiry is out of range
    pub fn issue_refresh(&self, identity: &Identity) -> Result<String, JwtError> {
        let expires_at = self.expiry_after(self.refresh_ttl)?;
        self.encode(&Claims::new(identity, TokenKind::Refresh, expires_at))
    }

    fn expiry_after(&self, ttl: Duration) -> Result<i64, JwtError> {
        self.clock
            .now()
            .checked_add_signed(ttl)
            .map(|expires_at| expires_at.timestamp())
            .ok_or_else(|| {
                JwtError::EncodingFailed(format!("token lifetime {} out of range", ttl))
            })
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        let token = encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            user_id = claims.sub,
            kind = %claims.kind,
            expires_at = claims.exp,
            "Token issued"
        );

        Ok(token)
    }

    /// Decode a token, verifying its signature and expiry.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `InvalidSignature` - Token was not signed with this secret
    /// * `Expired` - Token expiry is in the past
    pub fn decode_verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Decode a token and require it to be of `expected` kind.
    ///
    /// # Errors
    /// * Any error from [`JwtHandler::decode_verify`]
    /// * `WrongKind` - Token is valid but of the other kind
    pub fn decode_expecting(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = self.decode_verify(token)?;

        if claims.kind != expected {
            return Err(JwtError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}
