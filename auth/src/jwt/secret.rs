use std::fmt;

use super::errors::JwtError;

/// Symmetric key used both to sign and to verify tokens.
///
/// Built once from configuration and handed to the codec; the bytes are never
/// printed, so a `SigningSecret` is safe to keep inside `Debug` structs.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap raw key material.
    ///
    /// # Errors
    /// * `EmptySecret` - No key material was supplied
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, JwtError> {
        let bytes = secret.into();
        if bytes.is_empty() {
            return Err(JwtError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
