use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;

use super::helpers::{farmer_token, new_test_db, send, vendor_token, with_bearer};

fn tomato_listing() -> serde_json::Value {
    json!({
        "product_name": "Tomatoes",
        "description": "Vine ripened",
        "price_kg": 5_000,
        "price_sack": 120_000,
        "unit_type": "kg",
        "quantity": 10
    })
}

#[actix_web::test]
async fn vendors_may_not_list_products() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let req = with_bearer(TestRequest::post().uri("/api/products"), &vendor_token(10)).set_json(tomato_listing());
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn listing_without_any_price_is_rejected() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let body = json!({ "product_name": "Ghost peppers", "quantity": 5 });
    let req = with_bearer(TestRequest::post().uri("/api/products"), &farmer_token(1)).set_json(body);
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_products_return_not_found() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let (status, _) = send(&db, TestRequest::get().uri("/api/products/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn bad_cart_units_return_bad_request() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let req = with_bearer(TestRequest::post().uri("/api/products"), &farmer_token(1)).set_json(tomato_listing());
    let (status, created) = send(&db, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = created["product_id"].as_i64().unwrap();

    let body = json!({ "product_id": product_id, "quantity": 2, "unit_type": "crate" });
    let req = with_bearer(TestRequest::post().uri("/api/cart"), &vendor_token(10)).set_json(body);
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn checkout_of_an_empty_cart_is_a_bad_request() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let req = with_bearer(TestRequest::post().uri("/api/checkout"), &vendor_token(10)).set_json(json!({}));
    let (status, body) = send(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");
}

#[actix_web::test]
async fn full_marketplace_flow() {
    let _ = env_logger::try_init();
    let db = new_test_db().await;
    let grower = farmer_token(1);
    let buyer = vendor_token(10);

    // The farmer lists tomatoes. No harvest tracking, so the listing is Fresh with no discount.
    let req = with_bearer(TestRequest::post().uri("/api/products"), &grower).set_json(tomato_listing());
    let (status, created) = send(&db, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["freshness_score"], 100);
    assert_eq!(created["freshness_status"], "Fresh");
    assert!(created["discount_price"].is_null());
    let product_id = created["product_id"].as_i64().unwrap();

    // The vendor browses and sees the listing with derived freshness.
    let (status, listings) = send(&db, TestRequest::get().uri("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listings.as_array().unwrap().len(), 1);
    assert_eq!(listings[0]["id"].as_i64(), Some(product_id));
    assert_eq!(listings[0]["freshness_status"], "Fresh");

    // Cart up 3 kg and a sack, then check out with delivery details.
    let body = json!({ "product_id": product_id, "quantity": 3, "unit_type": "kg" });
    let req = with_bearer(TestRequest::post().uri("/api/cart"), &buyer).set_json(body);
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let body = json!({ "product_id": product_id, "quantity": 1, "unit_type": "sack" });
    let req = with_bearer(TestRequest::post().uri("/api/cart"), &buyer).set_json(body);
    let (status, cart) = send(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["cart_total"], 3 * 5_000 + 120_000);

    let details = json!({ "payment_method": "GCash", "delivery_address": "12 Mabini St" });
    let req = with_bearer(TestRequest::post().uri("/api/checkout"), &buyer).set_json(details);
    let (status, orders) = send(&db, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let orders = orders.as_array().unwrap().clone();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["status"] == "pending"));
    let order_id = orders[0]["id"].as_i64().unwrap();

    // Stock went down and the cart is empty now.
    let (_, product) = send(&db, TestRequest::get().uri(&format!("/api/products/{product_id}"))).await;
    assert_eq!(product["quantity"], 6);
    let (_, cart) = send(&db, with_bearer(TestRequest::get().uri("/api/cart"), &buyer)).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    // Both sides see the orders in their histories.
    let (status, mine) = send(&db, with_bearer(TestRequest::get().uri("/api/orders/mine"), &buyer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 2);
    let (status, sales) = send(&db, with_bearer(TestRequest::get().uri("/api/orders/sales"), &grower)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales.as_array().unwrap().len(), 2);

    // The farmer confirms the first order; a vendor may not, and skipping stages is a conflict.
    let uri = format!("/api/orders/{order_id}/status");
    let req = with_bearer(TestRequest::patch().uri(&uri), &buyer).set_json(json!({ "status": "confirmed" }));
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = with_bearer(TestRequest::patch().uri(&uri), &grower).set_json(json!({ "status": "delivered" }));
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let req = with_bearer(TestRequest::patch().uri(&uri), &grower).set_json(json!({ "status": "confirmed" }));
    let (status, order) = send(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "confirmed");

    // Another farmer cannot touch the order either.
    let req =
        with_bearer(TestRequest::patch().uri(&uri), &farmer_token(2)).set_json(json!({ "status": "shipped" }));
    let (status, _) = send(&db, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
