use actix_web::test;
use bingo_backend::infra::state::build_state;

use crate::common::json_body;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_latest_migration() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20240601_000002_users_sessions");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
}

#[actix_web::test]
async fn health_stays_up_without_a_database() {
    let state = build_state().build().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].as_str().is_some());
}
