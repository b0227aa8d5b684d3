use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminates what a token may be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential for ordinary authenticated calls.
    Access,
    /// Long-lived credential accepted only by the refresh exchange.
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Who a token speaks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Identity claims embedded in every issued token.
///
/// Exactly these fields are signed; there are no optional or extra claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id)
    pub sub: i64,

    pub email: String,

    pub role: String,

    pub kind: TokenKind,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `identity` expiring at the absolute instant `exp`.
    pub fn new(identity: &Identity, kind: TokenKind, exp: i64) -> Self {
        Self {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role.clone(),
            kind,
            exp,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub,
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token stays valid through the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
