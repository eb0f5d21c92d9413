use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";

/// Salted argon2id hash in PHC string format.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

/// Constant-time verification against a stored PHC hash. A malformed
/// stored hash verifies as false rather than erroring.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// The signed session cookie carries only the user id; the signature
/// comes from the jar's key.
pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Identity gate for all financial operations.
pub fn require_session(jar: &SignedCookieJar) -> Result<i64, AppError> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i64>().ok())
        .ok_or(AppError::Unauthenticated)
}
