use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use bingo_backend::errors::ErrorCode;
use bingo_backend::infra::state::build_state;
use bingo_backend::AppError;

use crate::common::assert_problem_details_structure;
use crate::support::create_test_app;

async fn validation_error() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(
        ErrorCode::ValidationError,
        "Field validation failed",
    ))
}

async fn not_found_error() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

async fn unauthorized_error() -> Result<HttpResponse, AppError> {
    Err(AppError::unauthorized())
}

async fn conflict_error() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(
        ErrorCode::UniqueViolation,
        "Duplicate link",
    ))
}

async fn internal_error() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("Something broke"))
}

async fn db_unavailable_error() -> Result<HttpResponse, AppError> {
    Err(AppError::db_unavailable("Database unavailable"))
}

// handler-only: validates error shape; no DB
#[actix_web::test]
async fn all_error_responses_conform_to_problem_details() {
    let state = build_state().build().await.expect("create test state");
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/validation", web::get().to(validation_error))
                .route("/_test/not_found", web::get().to(not_found_error))
                .route("/_test/unauthorized", web::get().to(unauthorized_error))
                .route("/_test/conflict", web::get().to(conflict_error))
                .route("/_test/internal", web::get().to(internal_error))
                .route("/_test/db_unavailable", web::get().to(db_unavailable_error));
        })
        .build()
        .await;

    let cases = [
        ("/_test/validation", 400, "VALIDATION_ERROR", "Field validation failed"),
        ("/_test/not_found", 404, "NOT_FOUND", "Resource not found"),
        ("/_test/unauthorized", 401, "UNAUTHORIZED", "Authentication required"),
        ("/_test/conflict", 409, "UNIQUE_VIOLATION", "Duplicate link"),
        ("/_test/internal", 500, "INTERNAL", "Something broke"),
        ("/_test/db_unavailable", 503, "DB_UNAVAILABLE", "Database unavailable"),
    ];

    for (uri, status, code, detail) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body =
            assert_problem_details_structure(test::call_service(&app, req).await, status, code, detail)
                .await;
        assert!(!body["title"].as_str().unwrap_or_default().is_empty());
    }
}

#[actix_web::test]
async fn missing_database_surfaces_as_503() {
    let state = build_state().build().await.expect("create test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/theme").to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "DB_UNAVAILABLE",
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let state = build_state().build().await.expect("create test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"username": "a", "password": "#)
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "BAD_REQUEST",
        "unexpected end of input",
    )
    .await;
}
