pub mod db;
pub mod server;

/// Reads an environment variable; `None` when unset or not unicode.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
