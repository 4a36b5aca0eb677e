mod support;

use farmgate_engine::{
    db_types::{CheckoutDetails, OrderStatusType},
    market_api::MarketplaceError,
    traits::{CartManagement, OrderManagement, ProductManagement},
    CartApi, OrderFlowApi,
};
use fg_common::Money;
use support::{new_test_db, old_mangoes, seed_product, tomatoes, vendor};

#[tokio::test]
async fn checkout_of_an_empty_cart_is_rejected() {
    let db = new_test_db().await;
    let api = OrderFlowApi::new(db);
    let err = api.checkout(&vendor(10), &CheckoutDetails::default()).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::EmptyCart));
}

#[tokio::test]
async fn checkout_converts_every_line_and_clears_the_cart() {
    let db = new_test_db().await;
    let product_id = seed_product(&db, 1, &tomatoes(10)).await;
    let carts = CartApi::new(db.clone());
    let orders = OrderFlowApi::new(db.clone());
    let buyer = vendor(10);

    carts.add_to_cart(&buyer, product_id, 3, Some("kg")).await.unwrap();
    carts.add_to_cart(&buyer, product_id, 1, Some("sack")).await.unwrap();

    let details = CheckoutDetails {
        payment_method: Some("GCash".to_string()),
        delivery_address: Some("12 Mabini St".to_string()),
        order_notes: None,
    };
    let placed = orders.checkout(&buyer, &details).await.unwrap();

    assert_eq!(placed.len(), 2);
    let total: Money = placed.iter().map(|o| o.total_price).sum();
    assert_eq!(total, Money::from(3 * 5_000 + 120_000));
    for order in &placed {
        assert_eq!(order.status, OrderStatusType::Pending);
        assert_eq!(order.payment_method, "GCash");
        assert_eq!(order.delivery_address, "12 Mabini St");
        assert_eq!(order.order_notes, "");
    }

    // Both lines decremented stock and the cart is gone.
    let product = db.fetch_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 10 - 3 - 1);
    assert!(db.fetch_cart(buyer.id).await.unwrap().is_empty());

    let history = orders.purchases(&buyer).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn one_short_line_aborts_the_whole_checkout() {
    let db = new_test_db().await;
    let plenty = seed_product(&db, 1, &tomatoes(10)).await;
    let mut scarce_product = tomatoes(2);
    scarce_product.product_name = "Lettuce".to_string();
    let scarce = seed_product(&db, 1, &scarce_product).await;
    let carts = CartApi::new(db.clone());
    let orders = OrderFlowApi::new(db.clone());
    let buyer = vendor(10);

    carts.add_to_cart(&buyer, plenty, 3, None).await.unwrap();
    carts.add_to_cart(&buyer, scarce, 5, None).await.unwrap();

    let err = orders.checkout(&buyer, &CheckoutDetails::default()).await.unwrap_err();
    match err {
        MarketplaceError::InsufficientStock { product, available } => {
            assert_eq!(product, "Lettuce");
            assert_eq!(available, 2);
        },
        other => panic!("Expected InsufficientStock, got {other}"),
    }

    // Nothing happened: stock untouched, cart intact, no orders placed.
    assert_eq!(db.fetch_product(plenty).await.unwrap().unwrap().quantity, 10);
    assert_eq!(db.fetch_product(scarce).await.unwrap().unwrap().quantity, 2);
    assert_eq!(db.fetch_cart(buyer.id).await.unwrap().len(), 2);
    assert!(orders.purchases(&buyer).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_checkouts_never_oversell() {
    let db = new_test_db().await;
    let product_id = seed_product(&db, 1, &tomatoes(5)).await;
    let carts = CartApi::new(db.clone());
    let alice = vendor(10);
    let bob = vendor(11);
    carts.add_to_cart(&alice, product_id, 3, None).await.unwrap();
    carts.add_to_cart(&bob, product_id, 3, None).await.unwrap();

    let api_a = OrderFlowApi::new(db.clone());
    let api_b = OrderFlowApi::new(db.clone());
    let details_a = CheckoutDetails::default();
    let details_b = CheckoutDetails::default();
    let (res_a, res_b) = tokio::join!(
        api_a.checkout(&alice, &details_a),
        api_b.checkout(&bob, &details_b),
    );

    // Exactly one checkout can win; the loser fails without partial effects.
    let successes = [res_a.is_ok(), res_b.is_ok()].iter().filter(|s| **s).count();
    assert_eq!(successes, 1, "stock of 5 cannot satisfy two orders of 3");
    assert_eq!(db.fetch_product(product_id).await.unwrap().unwrap().quantity, 2);

    let winner = if res_a.is_ok() { &alice } else { &bob };
    let loser = if res_a.is_ok() { &bob } else { &alice };
    assert!(db.fetch_cart(winner.id).await.unwrap().is_empty());
    assert_eq!(db.fetch_cart(loser.id).await.unwrap().len(), 1);
    assert!(db.orders_for_vendor(loser.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn direct_purchase_charges_the_smart_deal_price_for_old_produce() {
    let db = new_test_db().await;
    // Base price ₱19.99; at the Old tier the discount price is 80% of that, ₱15.99.
    let product_id = seed_product(&db, 1, &old_mangoes(10, 1_999)).await;
    let api = OrderFlowApi::new(db.clone());
    let buyer = vendor(10);

    let order = api.direct_purchase(&buyer, product_id, 2).await.unwrap();

    assert_eq!(order.total_price, Money::from(2 * 1_599));
    assert_eq!(order.status, OrderStatusType::Pending);
    assert_eq!(order.payment_method, "COD");
    assert_eq!(db.fetch_product(product_id).await.unwrap().unwrap().quantity, 8);
}

#[tokio::test]
async fn direct_purchase_charges_the_base_price_for_fresh_produce() {
    let db = new_test_db().await;
    let product_id = seed_product(&db, 1, &tomatoes(10)).await;
    let api = OrderFlowApi::new(db);
    let order = api.direct_purchase(&vendor(10), product_id, 2).await.unwrap();
    assert_eq!(order.total_price, Money::from(2 * 5_000));
}

#[tokio::test]
async fn direct_purchase_validates_its_input() {
    let db = new_test_db().await;
    let product_id = seed_product(&db, 1, &tomatoes(3)).await;
    let api = OrderFlowApi::new(db.clone());
    let buyer = vendor(10);

    let err = api.direct_purchase(&buyer, product_id, 0).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    let err = api.direct_purchase(&buyer, product_id, 4).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::InsufficientStock { available: 3, .. }));

    let err = api.direct_purchase(&buyer, 9999, 1).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::ProductNotFound(9999)));

    // A failed purchase leaves stock untouched.
    assert_eq!(db.fetch_product(product_id).await.unwrap().unwrap().quantity, 3);
}
