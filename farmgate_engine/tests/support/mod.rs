#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use farmgate_engine::{
    db_types::{NewProduct, Role, UnitType, UserIdentity},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::ProductManagement,
    SqliteDatabase,
};
use fg_common::Money;

pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub fn farmer(id: i64) -> UserIdentity {
    UserIdentity::new(id, Role::Farmer)
}

pub fn vendor(id: i64) -> UserIdentity {
    UserIdentity::new(id, Role::Vendor)
}

pub fn tomatoes(quantity: i64) -> NewProduct {
    NewProduct {
        product_name: "Tomatoes".to_string(),
        description: Some("Vine ripened".to_string()),
        price_each: None,
        price_kg: Some(Money::from(5_000)),
        price_sack: Some(Money::from(120_000)),
        unit_type: UnitType::Kg,
        quantity,
        harvest_date: None,
        expiry_days: None,
        image_url: None,
    }
}

/// A product harvested long enough ago that its freshness tier is Old, triggering the smart-deal
/// discount of 80% of the base price.
pub fn old_mangoes(quantity: i64, base_centavos: i64) -> NewProduct {
    NewProduct {
        product_name: "Mangoes".to_string(),
        description: None,
        price_each: None,
        price_kg: Some(Money::from(base_centavos)),
        price_sack: None,
        unit_type: UnitType::Kg,
        quantity,
        harvest_date: Some(harvested_days_ago(9)),
        expiry_days: Some(10),
        image_url: None,
    }
}

pub fn harvested_days_ago(days: i64) -> NaiveDate {
    (Utc::now() - Duration::days(days)).date_naive()
}

pub async fn seed_product(db: &SqliteDatabase, farmer_id: i64, product: &NewProduct) -> i64 {
    let base = product.base_price().expect("seed product must carry a price");
    db.insert_product(farmer_id, product, base).await.expect("Error seeding product")
}
