// src/db/seed.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SupplierRepository},
    models::{product::Product, supplier::Supplier},
};

/// Quantas linhas a carga inicial inseriu em cada tabela.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub suppliers_inserted: usize,
    pub products_inserted: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.suppliers_inserted + self.products_inserted
    }
}

fn example_supplier() -> Supplier {
    Supplier {
        id: "1".into(),
        legal_name: "Elettroforniture SpA".into(),
        vat_number: "12345678901".into(),
        address: "Via Roma 1, Milano".into(),
        email: "info@elettroforniture.it".into(),
        phone: "02123456".into(),
        notes: "Fornitore principale".into(),
    }
}

fn example_product() -> Product {
    Product {
        id: "1".into(),
        name: "Interruttore Magnetotermico".into(),
        code: "INT001".into(),
        category: "Interruttori".into(),
        description: "Interruttore magnetotermico 16A".into(),
        price: Decimal::new(2550, 2),
        purchase_price: Decimal::new(1530, 2),
        vat_rate: 22,
        quantity: 100,
        unit: "pz".into(),
        supplier_id: "1".into(),
        supplier_code: "F001".into(),
        min_stock: 10,
        location: "A1-B2".into(),
        ..Default::default()
    }
}

/// Carga inicial: cada tabela só recebe o exemplo se estiver vazia.
/// Rodar de novo com dados já presentes não insere nada.
pub async fn seed_if_empty(
    suppliers: &SupplierRepository,
    products: &ProductRepository,
) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    if suppliers.count().await? == 0 {
        suppliers.create(example_supplier()).await?;
        report.suppliers_inserted += 1;
    }

    if products.count().await? == 0 {
        products.create(example_product()).await?;
        report.products_inserted += 1;
    }

    if report.total() > 0 {
        tracing::info!(
            suppliers = report.suppliers_inserted,
            products = report.products_inserted,
            "🌱 Dados de exemplo inseridos"
        );
    } else {
        tracing::debug!("Banco já populado, carga inicial ignorada");
    }
    Ok(report)
}
