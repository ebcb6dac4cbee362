//! Visitor registration and login.
//!
//! Passwords are hashed with Argon2; login failures never distinguish an
//! unknown email from a wrong password.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use trailpass_core::Email;

use crate::db::RepositoryError;
use crate::models::Visitor;
use crate::store::VisitorStore;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Full name, email, and password are required.")]
    MissingFields,

    #[error("Invalid email address.")]
    InvalidEmail(#[from] trailpass_core::EmailError),

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters.")]
    WeakPassword,

    #[error("Email is already registered.")]
    EmailTaken,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("password hashing error")]
    PasswordHash,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Authentication service over a visitor store.
pub struct AuthService<V> {
    visitors: V,
}

impl<V: VisitorStore> AuthService<V> {
    /// Create a new authentication service.
    pub const fn new(visitors: V) -> Self {
        Self { visitors }
    }

    /// Register a new visitor.
    ///
    /// The email is normalized (trimmed, lowercased) before the uniqueness
    /// check, so registration is case-insensitive on email.
    ///
    /// # Errors
    ///
    /// Returns `MissingFields`, `InvalidEmail`, `WeakPassword`, or
    /// `EmailTaken` for invalid input; `Repository` for store failures.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Visitor, AuthError> {
        let full_name = full_name.trim();
        if full_name.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let visitor = self
            .visitors
            .create(full_name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(visitor_id = %visitor.id, "visitor registered");
        Ok(visitor)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if the email is unknown or the password
    /// is wrong; the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Visitor, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (visitor, password_hash) = self
            .visitors
            .credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(visitor)
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Hash a password with Argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored Argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
