// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, money::format_eur},
    db::{ProductRepository, QuoteRepository, SupplierRepository},
    models::{
        dashboard::DashboardSummary,
        product::Product,
        quote::{Quote, QuoteStatus},
        supplier::Supplier,
    },
};

/// Valor do estoque: Σ prezzo × quantita. Sem arredondar.
pub fn warehouse_value(products: &[Product]) -> Decimal {
    products.iter().map(Product::stock_value).sum()
}

/// Monta os cartões a partir das coleções (a tela recebe as três pelos observadores).
pub fn summarize(products: &[Product], quotes: &[Quote], suppliers: &[Supplier]) -> DashboardSummary {
    let value = warehouse_value(products);
    DashboardSummary {
        product_count: products.len(),
        active_quotes: quotes.iter().filter(|q| q.status == QuoteStatus::Sent).count(),
        supplier_count: suppliers.len(),
        warehouse_value: value,
        warehouse_value_display: format_eur(value),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    products: ProductRepository,
    quotes: QuoteRepository,
    suppliers: SupplierRepository,
}

impl DashboardService {
    pub fn new(products: ProductRepository, quotes: QuoteRepository, suppliers: SupplierRepository) -> Self {
        Self { products, quotes, suppliers }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let products = self.products.list_all().await?;
        let quotes = self.quotes.list_all().await?;
        let suppliers = self.suppliers.list_all().await?;
        Ok(summarize(&products, &quotes, &suppliers))
    }
}
