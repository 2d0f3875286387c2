//! Unique test data built from ULIDs, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("square");
/// assert_ne!(a, unique_str("square"));
/// assert!(a.starts_with("square-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A valid username (`[A-Za-z0-9_]`) that no other call returns.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("alice");
/// assert!(name.starts_with("alice_"));
/// assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}
