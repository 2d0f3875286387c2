use actix_web::test;
use uuid::Uuid;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn every_response_carries_a_fresh_trace_id() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/api/theme").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let id = resp
            .headers()
            .get("x-trace-id")
            .and_then(|v| v.to_str().ok())
            .expect("x-trace-id header")
            .to_string();
        assert!(Uuid::parse_str(&id).is_ok(), "{id} is not a uuid");
        ids.push(id);
    }
    assert_ne!(ids[0], ids[1]);
}
