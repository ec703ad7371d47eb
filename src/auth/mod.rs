//! Accounts and sessions
//!
//! Registration, credential checks and bearer-token sessions on top of the
//! `users` and `sessions` tables.

pub mod password;
pub mod token;

use chrono::{Duration, Utc};
use rusqlite::{Connection, ErrorCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::DbError;
use crate::models::{
    normalize_email, validate_email, validate_name, validate_profile_fields, BiometricProfile,
    ProfileError, Session, User, UserCreate,
};

pub use password::{check_password_strength, hash_password, verify_password};
pub use token::{generate_token, hash_token, strip_bearer};

/// Longest session lifetime accepted from configuration (10 years)
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authorized: no session token")]
    MissingSession,

    #[error("Not authorized: invalid session token")]
    InvalidSession,

    #[error("Not authorized: session expired")]
    SessionExpired,

    #[error("Password must be at least {min_len} characters")]
    WeakPassword { min_len: usize },

    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// New account request
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: BiometricProfile,
}

/// A user together with a freshly issued session token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: User,
}

/// Issue a new session for a user and return the plaintext token
pub fn issue_session(conn: &Connection, user_id: i64, ttl_hours: i64) -> AuthResult<String> {
    let token = generate_token();
    let ttl = Duration::hours(ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS));
    Session::create(conn, &hash_token(&token), user_id, Utc::now() + ttl)?;
    Ok(token)
}

/// Validate and store a new account, then sign it in
pub fn register(
    conn: &Connection,
    registration: &Registration,
    config: &Config,
) -> AuthResult<AuthenticatedUser> {
    validate_name(&registration.name)?;
    let email = normalize_email(&registration.email);
    validate_email(&email)?;
    check_password_strength(&registration.password)?;
    validate_profile_fields(&registration.profile)?;

    if User::get_by_email(conn, &email)?.is_some() {
        warn!("Registration rejected: email already registered");
        return Err(AuthError::DuplicateEmail(email));
    }

    let password_hash = hash_password(&registration.password, config.password_cost)?;

    // The account and its first session land together or not at all
    let tx = conn.unchecked_transaction().map_err(DbError::from)?;
    let created = User::create(
        &tx,
        &UserCreate {
            name: registration.name.clone(),
            email: email.clone(),
            password_hash,
            profile: registration.profile,
        },
    );
    let user = match created {
        Ok(user) => user,
        Err(e) if is_duplicate_email(&e) => {
            warn!("Registration rejected: email registered concurrently");
            return Err(AuthError::DuplicateEmail(email));
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_session(&tx, user.id, config.session_ttl_hours)?;
    tx.commit().map_err(DbError::from)?;
    info!(user_id = user.id, "Registered user");

    Ok(AuthenticatedUser { token, user })
}

/// UNIQUE violation on `users.email`
fn is_duplicate_email(err: &DbError) -> bool {
    match err {
        DbError::Sqlite(rusqlite::Error::SqliteFailure(e, Some(msg))) => {
            e.code == ErrorCode::ConstraintViolation && msg.contains("users.email")
        }
        _ => false,
    }
}

/// Check credentials and open a session. Unknown email and wrong password
/// produce the same error.
pub fn login(
    conn: &Connection,
    email: &str,
    password: &str,
    config: &Config,
) -> AuthResult<AuthenticatedUser> {
    let purged = Session::delete_expired(conn, Utc::now())?;
    if purged > 0 {
        info!(purged, "Purged expired sessions");
    }

    let user = match User::get_by_email(conn, email)? {
        Some(user) => user,
        None => {
            warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_session(conn, user.id, config.session_ttl_hours)?;
    info!(user_id = user.id, "User logged in");

    Ok(AuthenticatedUser { token, user })
}

/// Resolve a bearer token to its user
pub fn authenticate(conn: &Connection, token: &str) -> AuthResult<User> {
    let token = strip_bearer(token);
    if token.is_empty() {
        return Err(AuthError::MissingSession);
    }

    let token_hash = hash_token(token);
    let session = Session::get(conn, &token_hash)?.ok_or(AuthError::InvalidSession)?;

    if session.is_expired(Utc::now()) {
        Session::delete(conn, &token_hash)?;
        return Err(AuthError::SessionExpired);
    }

    User::get_by_id(conn, session.user_id)?.ok_or(AuthError::InvalidSession)
}

/// End a session. Returns false if the token was not active.
pub fn logout(conn: &Connection, token: &str) -> AuthResult<bool> {
    let removed = Session::delete(conn, &hash_token(strip_bearer(token)))?;
    if removed {
        info!("Session closed");
    }
    Ok(removed)
}
