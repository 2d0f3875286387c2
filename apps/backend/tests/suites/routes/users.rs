use actix_web::cookie::SameSite;
use actix_web::http::header::SET_COOKIE;
use actix_web::test;
use backend_test_support::unique_helpers::unique_username;
use serde_json::json;

use crate::common::{assert_problem_details_structure, json_body};
use crate::support::factory::{bearer, TEST_PASSWORD};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn register_login_logout() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let username = unique_username("casey");

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(json!({ "username": username, "name": "Casey", "password": TEST_PASSWORD }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body, json!({ "username": username, "name": "Casey" }));

    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(json!({ "username": username, "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("token cookie")
        .into_owned();
    let body = json_body(resp, 200).await;
    let token = body["token"].as_str().expect("token").to_string();
    assert_eq!(token.len(), 32);
    assert_eq!(cookie.value(), token);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));

    // The cookie alone authenticates
    let req = test::TestRequest::post()
        .uri("/api/theme")
        .cookie(cookie.clone())
        .set_json(json!({ "name": "Cookie theme" }))
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::post()
        .uri("/api/user/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);
    let removal = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("removal cookie")
        .to_string();
    assert!(removal.starts_with("token=;"), "{removal}");
    assert!(removal.contains("Max-Age=0"), "{removal}");

    let req = test::TestRequest::post()
        .uri("/api/user/logout")
        .insert_header(bearer(&token))
        .to_request();
    assert_problem_details_structure(test::call_service(&app, req).await, 401, "UNAUTHORIZED", "")
        .await;
}

#[actix_web::test]
async fn duplicate_username_is_rejected() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let username = unique_username("dup");
    let body = json!({ "username": username, "name": "Dup", "password": TEST_PASSWORD });

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(&body)
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(&body)
        .to_request();
    assert_problem_details_structure(
        test::call_service(&app, req).await,
        400,
        "USERNAME_TAKEN",
        "already taken",
    )
    .await;
}

#[actix_web::test]
async fn bad_credentials_are_indistinguishable() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let username = unique_username("erin");

    let req = test::TestRequest::post()
        .uri("/api/user/register")
        .set_json(json!({ "username": username, "name": "Erin", "password": TEST_PASSWORD }))
        .to_request();
    json_body(test::call_service(&app, req).await, 200).await;

    for (user, password) in [
        (username.as_str(), "wrong-password"),
        ("nobody_here", TEST_PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({ "username": user, "password": password }))
            .to_request();
        assert_problem_details_structure(
            test::call_service(&app, req).await,
            401,
            "INVALID_CREDENTIALS",
            "Invalid username or password",
        )
        .await;
    }
}

#[actix_web::test]
async fn registration_validation() {
    let state = build_test_state().await.expect("state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let cases = [
        (json!({ "username": "has space", "name": "X", "password": TEST_PASSWORD }), "letters, digits"),
        (json!({ "username": "short_pw", "name": "X", "password": "1234567" }), "at least 8"),
        (json!({ "username": "no_name", "name": " ", "password": TEST_PASSWORD }), "name must be"),
        (json!({ "username": "no_password", "name": "X" }), "missing field `password`"),
    ];

    for (body, detail) in cases {
        let req = test::TestRequest::post()
            .uri("/api/user/register")
            .set_json(body)
            .to_request();
        assert_problem_details_structure(
            test::call_service(&app, req).await,
            400,
            "VALIDATION_ERROR",
            detail,
        )
        .await;
    }
}
