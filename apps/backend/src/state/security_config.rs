use crate::error::AppError;

/// bcrypt cost used when `PASSWORD_HASH_COST` is unset.
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 12;

const MIN_PASSWORD_HASH_COST: u32 = 4;
const MAX_PASSWORD_HASH_COST: u32 = 31;

/// Password hashing and session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// bcrypt work factor, 4..=31
    pub password_hash_cost: u32,
    /// Adds the `Secure` attribute to the session cookie
    pub session_cookie_secure: bool,
}

impl SecurityConfig {
    pub fn new(password_hash_cost: u32) -> Self {
        Self {
            password_hash_cost,
            session_cookie_secure: false,
        }
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.session_cookie_secure = secure;
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(crate::config::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let cost = match lookup("PASSWORD_HASH_COST") {
            Some(raw) => {
                let cost = raw.trim().parse::<u32>().map_err(|_| {
                    AppError::config(format!("PASSWORD_HASH_COST must be an integer, got '{raw}'"))
                })?;
                if !(MIN_PASSWORD_HASH_COST..=MAX_PASSWORD_HASH_COST).contains(&cost) {
                    return Err(AppError::config(format!(
                        "PASSWORD_HASH_COST must be between {} and {}, got {cost}",
                        MIN_PASSWORD_HASH_COST,
                        MAX_PASSWORD_HASH_COST
                    )));
                }
                cost
            }
            None => DEFAULT_PASSWORD_HASH_COST,
        };

        let secure = match lookup("SESSION_COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::config(format!("SESSION_COOKIE_SECURE must be a boolean, got '{raw}'"))
            })?,
            None => false,
        };

        Ok(Self::new(cost).with_cookie_secure(secure))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_HASH_COST)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
