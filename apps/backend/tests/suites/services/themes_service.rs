use bingo_backend::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use bingo_backend::services::themes::ThemeService;

use crate::support::build_test_state;
use crate::support::factory::seed_theme;
use crate::support::test_state::db;

#[tokio::test]
async fn list_is_case_insensitive_and_escapes_wildcards() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let plain = seed_theme(conn, "Sales_Team").await;
    seed_theme(conn, "SalesXTeam").await;
    let service = ThemeService::new();

    let found = service.list(conn, Some("sales_")).await.expect("list");
    assert_eq!(found, vec![plain]);

    let all = service.list(conn, None).await.expect("list all");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn oversized_name_is_rejected() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);

    let err = ThemeService::new()
        .create(conn, &"n".repeat(256))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::Other(_), _)));
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let state = build_test_state().await.expect("state");
    let conn = db(&state);
    let theme = seed_theme(conn, "Once").await;
    let service = ThemeService::new();

    service.delete(conn, theme.id).await.expect("first delete");
    let err = service.delete(conn, theme.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Theme, _)));
}
