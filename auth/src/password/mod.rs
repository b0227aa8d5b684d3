//! Credential Hasher: salted Argon2id hashes in PHC string form.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
