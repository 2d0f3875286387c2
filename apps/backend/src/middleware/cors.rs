use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::TRACE_ID_HEADER;
use crate::config::env_lookup;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Build CORS middleware from `CORS_ALLOWED_ORIGINS`.
pub fn cors_middleware() -> Cors {
    cors_from_origins(&allowed_origins(env_lookup))
}

/// Comma-separated http(s) origins; empty and `null` entries are ignored.
/// Falls back to localhost when nothing valid is configured.
pub fn allowed_origins(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let raw = lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}

fn cors_from_origins(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static(TRACE_ID_HEADER)])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
