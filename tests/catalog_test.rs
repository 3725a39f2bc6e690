//! Catalog (products and suppliers) and dashboard integration tests.

mod common;

use common::{sample_product, sample_supplier, spawn_app};
use elettrogest::{
    models::{ProductPatch, SupplierPatch},
    services::{QuoteDraft, QuoteLineInput},
    AppError,
};
use rust_decimal::Decimal;

#[tokio::test]
async fn invalid_product_is_rejected() {
    let app = spawn_app().await;

    let mut product = sample_product("", "X", Decimal::ONE, 1);
    let err = app.catalog_service.create_product(product.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    product.name = "Cavo".into();
    product.price = Decimal::new(-1, 0);
    let err = app.catalog_service.create_product(product).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    assert_eq!(app.product_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_patch_is_rejected_and_row_is_untouched() {
    let app = spawn_app().await;
    let created = app
        .catalog_service
        .create_product(sample_product("Cavo", "CAV010", Decimal::ONE, 10))
        .await
        .unwrap();

    let err = app
        .catalog_service
        .update_product(
            &created.id,
            ProductPatch {
                quantity: Some(-3),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
    let stored = app.product_repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.quantity, 10);
}

#[tokio::test]
async fn supplier_email_may_be_empty_but_not_malformed() {
    let app = spawn_app().await;

    let mut supplier = sample_supplier("Cavi Nord Srl", "09876543210");
    supplier.email = String::new();
    let created = app.catalog_service.create_supplier(supplier).await.unwrap();

    let err = app
        .catalog_service
        .update_supplier(
            &created.id,
            SupplierPatch {
                email: Some("not-an-email".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn deleting_a_supplier_leaves_products_pointing_at_it() {
    let app = spawn_app().await;
    let supplier = app
        .catalog_service
        .create_supplier(sample_supplier("Elettroforniture SpA", "12345678901"))
        .await
        .unwrap();
    let mut product = sample_product("Interruttore", "INT001", Decimal::ONE, 1);
    product.supplier_id = supplier.id.clone();
    app.catalog_service.create_product(product).await.unwrap();

    app.catalog_service.delete_supplier(&supplier.id).await.unwrap();

    let orphans = app.catalog_service.products_by_supplier(&supplier.id).await.unwrap();
    assert_eq!(orphans.len(), 1);
    assert!(app.supplier_repo.find_by_id(&supplier.id).await.unwrap().is_none());
}

#[tokio::test]
async fn searches_and_low_stock() {
    let app = spawn_app().await;
    app.catalog_service
        .create_product(sample_product("Interruttore Magnetotermico", "INT001", Decimal::ONE, 100))
        .await
        .unwrap();
    // min_stock is 5 in the sample: 5 is already low
    app.catalog_service
        .create_product(sample_product("Presa Schuko", "PRE001", Decimal::ONE, 5))
        .await
        .unwrap();
    app.catalog_service
        .create_supplier(sample_supplier("Elettroforniture SpA", "12345678901"))
        .await
        .unwrap();

    assert_eq!(app.catalog_service.search_products("MAGNETO").await.unwrap().len(), 1);
    assert_eq!(app.catalog_service.search_products("001").await.unwrap().len(), 2);
    assert_eq!(app.catalog_service.search_suppliers("elettro").await.unwrap().len(), 1);

    let low = app.catalog_service.low_stock_products().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].code, "PRE001");
}

#[tokio::test]
async fn dashboard_summary_reflects_all_tables() {
    let app = spawn_app().await;
    let product = app
        .catalog_service
        .create_product(sample_product("Interruttore", "INT001", Decimal::new(2550, 2), 100))
        .await
        .unwrap();
    app.catalog_service
        .create_product(sample_product("Cavo", "CAV010", Decimal::new(1999, 2), 3))
        .await
        .unwrap();
    app.catalog_service
        .create_supplier(sample_supplier("Elettroforniture SpA", "12345678901"))
        .await
        .unwrap();
    let sent = app
        .quote_service
        .create_quote(QuoteDraft {
            client_name: "Rossi".into(),
            lines: vec![QuoteLineInput::new(&product.id, 1)],
            ..Default::default()
        })
        .await
        .unwrap();
    app.quote_service
        .set_status(&sent.id, elettrogest::models::QuoteStatus::Sent)
        .await
        .unwrap();
    app.quote_service
        .create_quote(QuoteDraft {
            client_name: "Bianchi".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let summary = app.dashboard_service.get_summary().await.unwrap();

    assert_eq!(summary.product_count, 2);
    assert_eq!(summary.supplier_count, 1);
    assert_eq!(summary.active_quotes, 1);
    assert_eq!(summary.warehouse_value, Decimal::new(260997, 2));
    assert_eq!(summary.warehouse_value_display, "2.609,97 €");
}
