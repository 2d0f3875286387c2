//! Registration, login and session lookup.

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::users::User;
use crate::repos::{sessions, users};
use crate::state::security_config::SecurityConfig;

pub const MAX_USERNAME_LEN: usize = 255;
pub const MAX_NAME_LEN: usize = 255;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Session tokens are 128 random bits, hex encoded.
const TOKEN_BYTES: usize = 16;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9_]+$").unwrap()
});

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub username: String,
    pub name: String,
}

/// User and session service.
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Register a new account. The password is hashed with the configured
    /// bcrypt cost on a blocking thread.
    pub async fn register<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        security: &SecurityConfig,
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<RegisteredUser, AppError> {
        validate_registration(username, name, password)?;

        if users::find_by_username(conn, username).await?.is_some() {
            debug!(username = %Redacted(username), "registration for taken username");
            return Err(DomainError::conflict(
                ConflictKind::UsernameTaken,
                format!("Username {username} is already taken"),
            )
            .into());
        }

        let password_hash = hash_password(password, security.password_hash_cost).await?;
        let user = users::create_user(conn, username, name.trim(), &password_hash).await?;

        info!(user_id = user.id, username = %Redacted(&user.username), "user registered");
        Ok(RegisteredUser {
            username: user.username,
            name: user.name,
        })
    }

    /// Check credentials and open a session, returning its token.
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    pub async fn login<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
        password: &str,
    ) -> Result<String, AppError> {
        let Some(user) = users::find_by_username(conn, username).await? else {
            debug!(username = %Redacted(username), "login for unknown username");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &user.password_hash).await? {
            debug!(user_id = user.id, "login with wrong password");
            return Err(AppError::invalid_credentials());
        }

        let token = new_session_token();
        sessions::create(conn, user.id, &token).await?;
        info!(user_id = user.id, "session opened");
        Ok(token)
    }

    /// Resolve a session token to its user.
    pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        token: &str,
    ) -> Result<User, AppError> {
        match sessions::find_user_by_token(conn, token).await? {
            Some((_, user)) => Ok(user),
            None => {
                debug!(token = %Redacted(token), "unknown session token");
                Err(AppError::unauthorized())
            }
        }
    }

    /// Close the session identified by `token`.
    pub async fn logout<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        token: &str,
    ) -> Result<(), AppError> {
        if !sessions::delete_by_token(conn, token).await? {
            return Err(AppError::unauthorized());
        }
        info!(token = %Redacted(token), "session closed");
        Ok(())
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_registration(username: &str, name: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::validation_other(format!(
            "username must be 1 to {MAX_USERNAME_LEN} characters"
        ))
        .into());
    }
    if !USERNAME_RE.is_match(username) {
        return Err(DomainError::validation_other(
            "username may only contain letters, digits and underscores",
        )
        .into());
    }
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation_other(format!(
            "name must be 1 to {MAX_NAME_LEN} characters"
        ))
        .into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation_other(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }
    Ok(())
}

async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?;
    match verified {
        Ok(ok) => Ok(ok),
        Err(e) => {
            warn!(error = %e, "stored password hash is unreadable");
            Ok(false)
        }
    }
}

fn new_session_token() -> String {
    hex::encode(rand::random::<[u8; TOKEN_BYTES]>())
}
