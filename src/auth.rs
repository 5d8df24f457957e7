//! Admin credentials and session tokens

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand::RngCore;
use redb::Database;

use crate::config::Config;
use crate::database::insert_session;
use crate::error::{AppError, AppResult};
use crate::model::{random_token, Session};

const TOKEN_LEN: usize = 48;

/// Hashes a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AppError::Hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Hashing(e.to_string()))
}

/// Checks a password against a PHC string; a malformed hash is an error
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AppError::Hashing(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Validates the configured admin credentials
///
/// Without both `ADMIN_EMAIL` and `ADMIN_PASSWORD_HASH` nobody can sign in.
pub fn check_credentials(config: &Config, email: &str, password: &str) -> AppResult<String> {
    let (Some(admin_email), Some(hash)) = (&config.admin_email, &config.admin_password_hash) else {
        tracing::warn!("sign-in attempted but no admin account is configured");
        return Err(AppError::InvalidCredentials);
    };

    if !admin_email.trim().eq_ignore_ascii_case(email.trim()) {
        return Err(AppError::InvalidCredentials);
    }

    if !verify_password(password, hash)? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(admin_email.trim().to_string())
}

/// Creates and stores a new session, returning its bearer token
pub fn start_session(db: &Database, email: &str, ttl_hours: i64) -> AppResult<(String, Session)> {
    let now = Utc::now();
    let expires_at = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::Config(format!("session lifetime of {} hours is out of range", ttl_hours)))?;

    let session = Session {
        email: email.to_string(),
        created_at: now,
        expires_at,
    };

    let token = random_token(TOKEN_LEN);
    insert_session(db, &token, &session)?;

    Ok((token, session))
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
