#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;


// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Check that the trace_id in the response body matches the X-Trace-Id header
pub fn assert_trace_id_matches(json: &Value, header_trace_id: &str) {
    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, header_trace_id,
        "trace_id in body should match X-Trace-Id header"
    );
}

/// Validate a ProblemDetails response: status, content type, the status
/// specific headers, every field, and trace id parity. `expected_detail` is
/// matched as a substring.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("X-Trace-Id header should be present and valid UTF-8")
        .to_string();
    assert!(!trace_id.is_empty(), "X-Trace-Id header should not be empty");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    // Header rules from AppError::error_response:
    // 401 carries WWW-Authenticate, 503 carries Retry-After, nothing else does.
    match expected_status {
        401 => {
            let www_auth = headers.get("WWW-Authenticate");
            assert_eq!(
                www_auth.and_then(|v| v.to_str().ok()),
                Some("Bearer"),
                "401 responses must have WWW-Authenticate: Bearer"
            );
            assert!(headers.get("Retry-After").is_none());
        }
        503 => {
            assert!(
                headers.get("Retry-After").is_some(),
                "503 responses must have Retry-After"
            );
            assert!(headers.get("WWW-Authenticate").is_none());
        }
        _ => {
            assert!(
                headers.get("WWW-Authenticate").is_none(),
                "{expected_status} responses must not have WWW-Authenticate header"
            );
            assert!(
                headers.get("Retry-After").is_none(),
                "{expected_status} responses must not have Retry-After header"
            );
        }
    }

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    let problem_details: Value = serde_json::from_str(body_str).unwrap_or_else(|_| {
        panic!("Failed to parse error body as ProblemDetails. Raw body: {body_str}")
    });

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(
            problem_details.get(key).is_some(),
            "{key} field should be present"
        );
    }

    assert_eq!(problem_details["code"], expected_code);
    assert_eq!(problem_details["status"], expected_status);
    let detail = problem_details["detail"].as_str().unwrap_or_default();
    assert!(
        detail.contains(expected_detail),
        "expected detail containing {expected_detail:?}, got {detail:?}"
    );

    assert_trace_id_matches(&problem_details, &trace_id);

    assert_eq!(
        problem_details["type"],
        format!("/errors/{expected_code}"),
        "type should be the relative error path"
    );

    problem_details
}

/// Read a JSON body, asserting the status first.
pub async fn json_body(resp: ServiceResponse<BoxBody>, expected_status: u16) -> Value {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected_status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("JSON body")
}
