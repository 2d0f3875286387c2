use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, json_body};
use crate::support::factory::{bearer, seed_session, seed_square, seed_theme};
use crate::support::test_state::db;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_get_update_delete_roundtrip() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let (_, token) = seed_session(conn).await;
    let office = seed_theme(conn, "Office").await;
    let remote = seed_theme(conn, "Remote").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/square")
        .insert_header(bearer(&token))
        .set_json(json!({ "text": "You're on mute", "themeId": [office.id] }))
        .to_request();
    let created = json_body(test::call_service(&app, req).await, 200).await;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["text"], "You're on mute");
    assert_eq!(created["themes"], json!([{ "id": office.id, "name": "Office" }]));

    let req = test::TestRequest::get()
        .uri(&format!("/api/square/{id}"))
        .to_request();
    let fetched = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::put()
        .uri(&format!("/api/square/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id, "themeId": [remote.id] }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["text"], "You're on mute");
    assert_eq!(updated["themes"], json!([{ "id": remote.id, "name": "Remote" }]));

    let req = test::TestRequest::put()
        .uri(&format!("/api/square/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id, "text": "Can you see my screen?" }))
        .to_request();
    let updated = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["text"], "Can you see my screen?");
    assert_eq!(updated["themes"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/square/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/square/{id}"))
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        404,
        "NOT_FOUND",
        &format!("Square {id} not found"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/square/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_problem_details_structure(test::call_service(&app, req).await, 404, "NOT_FOUND", "")
        .await;
}

#[actix_web::test]
async fn list_filters_case_insensitively_in_id_order() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let a = seed_square(conn, "Someone says SYNERGY", &[]).await;
    seed_square(conn, "Coffee runs out", &[]).await;
    let c = seed_square(conn, "synergy again", &[]).await;
    let d = seed_square(conn, "100% synergy_ish", &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/square?text=Synergy")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![a.id, c.id, d.id]);

    // `%` in the needle is literal
    let req = test::TestRequest::get()
        .uri("/api/square?text=100%25")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/api/square").to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body.as_array().map(Vec::len), Some(4));
}

#[actix_web::test]
async fn mutations_require_a_session() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/square")
        .set_json(json!({ "text": "No token" }))
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        401,
        "UNAUTHORIZED",
        "Authentication required",
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/square/1")
        .insert_header(bearer("0123456789abcdef0123456789abcdef"))
        .to_request();
    assert_problem_details_structure(test::call_service(&app, req).await, 401, "UNAUTHORIZED", "")
        .await;
}

#[actix_web::test]
async fn body_validation() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let (_, token) = seed_session(conn).await;
    let square = seed_square(conn, "Existing", &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let id = square.id;

    let cases = [
        (
            test::TestRequest::post()
                .uri("/api/square")
                .set_json(json!({ "text": "x", "colour": "red" })),
            "VALIDATION_ERROR",
            "unknown field `colour`",
        ),
        (
            test::TestRequest::post()
                .uri("/api/square")
                .set_json(json!({ "text": "   " })),
            "VALIDATION_ERROR",
            "text must not be empty",
        ),
        (
            test::TestRequest::post()
                .uri("/api/square")
                .set_json(json!({ "text": "x".repeat(256) })),
            "VALIDATION_ERROR",
            "at most 255",
        ),
        (
            test::TestRequest::post()
                .uri("/api/square")
                .set_json(json!({ "text": "Ghost theme", "themeId": [4242] })),
            "THEME_NOT_FOUND",
            "4242",
        ),
        (
            test::TestRequest::put()
                .uri(&format!("/api/square/{id}"))
                .set_json(json!({ "id": id + 1, "text": "Other" })),
            "ID_MISMATCH",
            "does not match",
        ),
        (
            test::TestRequest::put()
                .uri(&format!("/api/square/{id}"))
                .set_json(json!({ "id": id })),
            "VALIDATION_ERROR",
            "requires text or themeId",
        ),
    ];

    for (req, code, detail) in cases {
        let req = req.insert_header(bearer(&token)).to_request();
        assert_problem_details_structure(test::call_service(&app, req).await, 400, code, detail)
            .await;
    }
}

#[actix_web::test]
async fn path_id_must_be_a_positive_integer() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    for uri in ["/api/square/abc", "/api/square/0", "/api/square/-5"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_problem_details_structure(test::call_service(&app, req).await, 400, "INVALID_ID", "")
            .await;
    }
}

#[actix_web::test]
async fn unknown_list_filter_is_rejected() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/square?txt=typo")
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "UNKNOWN_QUERY_PARAM",
        "txt",
    )
    .await;
}
