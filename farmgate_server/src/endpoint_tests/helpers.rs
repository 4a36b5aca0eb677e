use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use chrono::Duration;
use farmgate_engine::{
    db_types::{Role, UserIdentity},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CartApi,
    OrderFlowApi,
    ProductApi,
    SqliteDatabase,
};
use fg_common::Secret;

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::AuthConfig,
    routes::{
        health,
        AddToCartRoute,
        CheckoutRoute,
        CreateProductRoute,
        DirectOrderRoute,
        MyCartRoute,
        MyOrdersRoute,
        MySalesRoute,
        ProductByIdRoute,
        ProductListRoute,
        RemoveCartItemRoute,
        UpdateOrderStatusRoute,
    },
};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Secret::new("test-secret-test-secret-test-secret-test".to_string()),
        token_expiry: Duration::hours(1),
    }
}

pub fn issue_token(id: i64, role: Role) -> String {
    let issuer = TokenIssuer::new(&get_auth_config());
    issuer.issue_token(UserIdentity::new(id, role)).expect("Failed to sign token")
}

pub fn farmer_token(id: i64) -> String {
    issue_token(id, Role::Farmer)
}

pub fn vendor_token(id: i64) -> String {
    issue_token(id, Role::Vendor)
}

pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub fn with_bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Spins up the full route tree against the given database and executes one request. Test
/// services are cheap to build, so each call gets a fresh one.
pub async fn send(db: &SqliteDatabase, req: TestRequest) -> (StatusCode, serde_json::Value) {
    let app = App::new()
        .app_data(web::Data::new(ProductApi::new(db.clone())))
        .app_data(web::Data::new(CartApi::new(db.clone())))
        .app_data(web::Data::new(OrderFlowApi::new(db.clone())))
        .app_data(web::Data::new(TokenVerifier::new(&get_auth_config())))
        .service(health)
        .service(
            web::scope("/api")
                .service(ProductListRoute::<SqliteDatabase>::new())
                .service(ProductByIdRoute::<SqliteDatabase>::new())
                .service(CreateProductRoute::<SqliteDatabase>::new())
                .service(AddToCartRoute::<SqliteDatabase>::new())
                .service(MyCartRoute::<SqliteDatabase>::new())
                .service(RemoveCartItemRoute::<SqliteDatabase>::new())
                .service(CheckoutRoute::<SqliteDatabase>::new())
                .service(DirectOrderRoute::<SqliteDatabase>::new())
                .service(MyOrdersRoute::<SqliteDatabase>::new())
                .service(MySalesRoute::<SqliteDatabase>::new())
                .service(UpdateOrderStatusRoute::<SqliteDatabase>::new()),
        );
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, json)
}
