// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

// Os cartões do topo da Dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub product_count: usize,
    pub active_quotes: usize,  // Orçamentos com stato = inviato
    pub supplier_count: usize,
    pub warehouse_value: Decimal, // Σ prezzo × quantita, sem arredondar
    pub warehouse_value_display: String,
}
