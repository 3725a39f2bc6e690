//! Shared helpers for the integration tests.

#![allow(dead_code)]

use elettrogest::{
    models::{Product, Supplier},
    AppConfig, AppState,
};
use rust_decimal::Decimal;

/// Application state over a fresh in-memory database with migrations applied.
pub async fn spawn_app() -> AppState {
    AppState::new(&AppConfig::in_memory())
        .await
        .expect("Failed to open in-memory database")
}

pub fn sample_product(name: &str, code: &str, price: Decimal, quantity: i32) -> Product {
    Product {
        name: name.to_string(),
        code: code.to_string(),
        category: "Interruttori".to_string(),
        price,
        purchase_price: Decimal::new(1000, 2),
        vat_rate: 22,
        quantity,
        unit: "pz".to_string(),
        min_stock: 5,
        ..Default::default()
    }
}

pub fn sample_supplier(name: &str, vat_number: &str) -> Supplier {
    Supplier {
        legal_name: name.to_string(),
        vat_number: vat_number.to_string(),
        email: "ordini@example.it".to_string(),
        ..Default::default()
    }
}
