use actix_web::{http::StatusCode, test::TestRequest};

use super::helpers::{new_test_db, send, vendor_token, with_bearer};

#[actix_web::test]
async fn health_needs_no_token() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let (status, _) = send(&db, TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn browsing_the_catalog_needs_no_token() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let (status, body) = send(&db, TestRequest::get().uri("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn protected_routes_reject_missing_tokens() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let (status, _) = send(&db, TestRequest::get().uri("/api/cart")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn protected_routes_reject_tampered_tokens() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let mut token = vendor_token(10);
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    let (status, _) = send(&db, with_bearer(TestRequest::get().uri("/api/cart"), &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn tokens_must_use_the_bearer_scheme() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let token = vendor_token(10);
    let req = TestRequest::get().uri("/api/cart").insert_header(("Authorization", token));
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
