use std::collections::HashSet;

use actix_web::test;
use serde_json::Value;

use crate::common::{assert_problem_details_structure, json_body};
use crate::support::factory::{seed_square, seed_squares, seed_theme};
use crate::support::test_state::db;
use crate::support::{build_test_state, create_test_app};

fn cells(body: &Value) -> Vec<&Value> {
    body["card"]
        .as_array()
        .expect("card rows")
        .iter()
        .flat_map(|row| row.as_array().expect("card row").iter())
        .collect()
}

fn theme_ids(square: &Value) -> Vec<i64> {
    square["themes"]
        .as_array()
        .expect("themes array")
        .iter()
        .map(|t| t["id"].as_i64().expect("theme id"))
        .collect()
}

#[actix_web::test]
async fn deals_a_full_grid_of_distinct_squares() {
    let state = build_test_state().await.expect("state");
    seed_squares(db(&state), "Square", 12, &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/card?rows=3&columns=4")
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    let rows = body["card"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.as_array().map(Vec::len) == Some(4)));

    let ids: HashSet<i64> = cells(&body)
        .iter()
        .map(|sq| sq["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids.len(), 12, "every square is used exactly once");
}

#[actix_web::test]
async fn pool_smaller_than_card_is_too_few_squares() {
    let state = build_test_state().await.expect("state");
    seed_squares(db(&state), "Square", 4, &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/card?rows=3&columns=3")
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "TOO_FEW_SQUARES",
        "need 9, found 4",
    )
    .await;
}

#[actix_web::test]
async fn unknown_theme_is_reported_before_sampling() {
    let state = build_test_state().await.expect("state");
    let theme = seed_theme(db(&state), "Office").await;
    seed_squares(db(&state), "Square", 4, &[theme.id]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let uri = format!("/api/card?rows=2&columns=2&themeId={},99", theme.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "THEME_NOT_FOUND",
        "99",
    )
    .await;
}

#[actix_web::test]
async fn theme_filter_uses_or_semantics() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let a = seed_theme(conn, "Meetings").await;
    let b = seed_theme(conn, "Email").await;
    seed_squares(conn, "Meeting", 3, &[a.id]).await;
    seed_squares(conn, "Email", 2, &[b.id]).await;
    seed_squares(conn, "Other", 6, &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let uri = format!("/api/card?rows=2&columns=2&themeId={}&themeId={}", a.id, b.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    for square in cells(&body) {
        let ids = theme_ids(square);
        assert!(
            ids.contains(&a.id) || ids.contains(&b.id),
            "square {square} matches neither theme"
        );
    }
}

#[actix_web::test]
async fn exact_pool_returns_every_match_once() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let theme = seed_theme(conn, "Travel").await;
    let matching = seed_squares(conn, "Travel", 4, &[theme.id]).await;
    seed_squares(conn, "Other", 10, &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let uri = format!("/api/card?rows=2&columns=2&themeId%5B%5D={}", theme.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    let mut got: Vec<i64> = cells(&body)
        .iter()
        .map(|sq| sq["id"].as_i64().expect("id"))
        .collect();
    got.sort_unstable();
    let mut want: Vec<i64> = matching.iter().map(|s| s.id).collect();
    want.sort_unstable();
    assert_eq!(got, want);
}

#[actix_web::test]
async fn squares_carry_their_full_theme_list() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let a = seed_theme(conn, "A").await;
    let b = seed_theme(conn, "B").await;
    for n in 0..4 {
        seed_square(conn, &format!("Both {n}"), &[a.id, b.id]).await;
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let uri = format!("/api/card?rows=2&columns=2&themeId={}", a.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;

    for square in cells(&body) {
        assert_eq!(theme_ids(square), vec![a.id, b.id]);
    }
}

#[actix_web::test]
async fn query_validation_errors() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let cases = [
        ("/api/card?rows=1&columns=3", "INVALID_DIMENSIONS", "between 2 and 100"),
        ("/api/card?rows=3&columns=101", "INVALID_DIMENSIONS", "between 2 and 100"),
        ("/api/card?rows=3", "INVALID_DIMENSIONS", "columns is required"),
        ("/api/card?rows=3&columns=3&themeId=-1", "INVALID_THEME_ID", "positive integer"),
        ("/api/card?rows=3&columns=3&seed=4", "UNKNOWN_QUERY_PARAM", "seed"),
    ];

    for (uri, code, detail) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_problem_details_structure(test::call_service(&app, req).await, 400, code, detail)
            .await;
    }
}

#[actix_web::test]
async fn repeated_deals_are_not_all_identical() {
    let state = build_test_state().await.expect("state");
    seed_squares(db(&state), "Square", 30, &[]).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut seen = HashSet::new();
    for _ in 0..5 {
        let req = test::TestRequest::get()
            .uri("/api/card?rows=3&columns=3")
            .to_request();
        let body = json_body(test::call_service(&app, req).await, 200).await;
        let ids: Vec<i64> = cells(&body)
            .iter()
            .map(|sq| sq["id"].as_i64().expect("id"))
            .collect();
        seen.insert(ids);
    }
    assert!(seen.len() >= 2, "five deals from 30 squares were identical");
}
