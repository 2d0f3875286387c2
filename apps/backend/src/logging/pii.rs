use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns for redacting secrets from log output.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// bcrypt hash: `$2a$`, `$2b$` or `$2y$`, cost, 53 chars of salt+digest
    pub fn bcrypt_hash() -> &'static Regex {
        static BCRYPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\$2[aby]?\$\d{2}\$[./A-Za-z0-9]{53}").unwrap()
        });
        &BCRYPT_REGEX
    }

    /// Hex token (session tokens are 32 hex chars); anything from 16 chars up
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Replace password hashes and opaque tokens with placeholders.
///
/// Hashes go first so their embedded digests are not half-matched as tokens.
pub fn redact(input: &str) -> String {
    let hashes = PiiRegexRegistry::bcrypt_hash().replace_all(input, "[REDACTED_HASH]");
    PiiRegexRegistry::hex_token()
        .replace_all(&hashes, "[REDACTED_TOKEN]")
        .to_string()
}

/// Keep the first character of an identifier and mask the rest.
pub fn mask_identifier(input: &str) -> String {
    match input.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

/// Display wrapper that runs [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

/// Display wrapper for usernames in logs.
pub struct MaskedName<'a>(pub &'a str);

impl fmt::Display for MaskedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_identifier(self.0))
    }
}
