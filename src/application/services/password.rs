//! Password hashing with Argon2id.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::application::error::ApplicationError;

/// Hashes a password into a PHC string carrying its own salt and parameters.
pub fn hash_password(password: &str) -> Result<String, ApplicationError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApplicationError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Checks `password` against a stored PHC hash. The comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApplicationError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| ApplicationError::InternalError("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
