use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, json_body};
use crate::support::factory::{bearer, seed_session, seed_square, seed_theme};
use crate::support::test_state::db;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_rename_and_list() {
    let state = build_test_state().await.expect("state");
    let (_, token) = seed_session(db(&state)).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/theme")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Standup" }))
        .to_request();
    let created = json_body(test::call_service(&app, req).await, 200).await;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["name"], "Standup");

    let req = test::TestRequest::put()
        .uri(&format!("/api/theme/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id, "name": "Daily Standup" }))
        .to_request();
    let renamed = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(renamed, json!({ "id": id, "name": "Daily Standup" }));

    let req = test::TestRequest::get()
        .uri("/api/theme?name=daily")
        .to_request();
    let listed = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(listed, json!([{ "id": id, "name": "Daily Standup" }]));

    let req = test::TestRequest::get()
        .uri("/api/theme?name=retro")
        .to_request();
    let listed = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn deleting_a_theme_unlinks_its_squares() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let (_, token) = seed_session(conn).await;
    let doomed = seed_theme(conn, "Doomed").await;
    let kept = seed_theme(conn, "Kept").await;
    let square = seed_square(conn, "Linked twice", &[doomed.id, kept.id]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/theme/{}", doomed.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/square/{}", square.id))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["themes"], json!([{ "id": kept.id, "name": "Kept" }]));

    let req = test::TestRequest::get()
        .uri(&format!("/api/theme/{}", doomed.id))
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        404,
        "NOT_FOUND",
        "not found",
    )
    .await;
}

#[actix_web::test]
async fn rename_of_missing_theme_is_not_found() {
    let state = build_test_state().await.expect("state");
    let (_, token) = seed_session(db(&state)).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri("/api/theme/77")
        .insert_header(bearer(&token))
        .set_json(json!({ "id": 77, "name": "Nowhere" }))
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        404,
        "NOT_FOUND",
        "Theme 77 not found",
    )
    .await;
}

#[actix_web::test]
async fn blank_name_is_rejected() {
    let state = build_test_state().await.expect("state");
    let (_, token) = seed_session(db(&state)).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/theme")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "" }))
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "VALIDATION_ERROR",
        "name must not be empty",
    )
    .await;
}
