use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

/// Body for `POST /api/cart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: i64,
    /// One of `kg`, `each` or `sack`. Absent or empty means kg.
    #[serde(default)]
    pub unit_type: Option<String>,
}

/// Body for `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectOrderRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body for `PATCH /api/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}
