// src/models/product.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Il valore non può essere negativo.".into());
        return Err(err);
    }
    Ok(())
}

// --- Prodotto (Magazzino) ---
// As chaves JSON seguem o formato já gravado pelo app antigo (nome, codice, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default)]
    pub id: String,

    #[validate(length(min = 1, message = "Il nome è obbligatorio."))]
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "codice")]
    pub code: String,

    #[serde(rename = "categoria")]
    pub category: String,

    #[serde(rename = "descrizione", default)]
    pub description: String,

    // Preço de venda
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(rename = "prezzo")]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(rename = "prezzoAcquisto")]
    pub purchase_price: Decimal,

    // Alíquota de IVA em porcentagem inteira (ex: 22)
    #[validate(range(min = 0, max = 100))]
    #[serde(rename = "iva")]
    pub vat_rate: i32,

    #[validate(range(min = 0))]
    #[serde(rename = "quantita")]
    pub quantity: i32,

    #[serde(rename = "unita", default)]
    pub unit: String,

    // Referência fraca: nada garante que o fornecedor existe
    #[serde(rename = "fornitoreId", default)]
    pub supplier_id: String,

    #[serde(rename = "codiceFornitori", default)]
    pub supplier_code: String,

    #[serde(rename = "specifiche", default)]
    pub specifications: BTreeMap<String, String>,

    #[validate(range(min = 0))]
    #[serde(rename = "scortaMinima")]
    pub min_stock: i32,

    #[serde(rename = "ubicazione", default)]
    pub location: String,

    #[serde(rename = "dataUltimoAcquisto", default, skip_serializing_if = "Option::is_none")]
    pub last_purchase_at: Option<DateTime<Utc>>,

    #[serde(rename = "note", default)]
    pub notes: String,
}

impl Product {
    /// Valor desta linha de estoque (preço de venda × quantidade), sem arredondar.
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn is_below_min_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

// Atualização parcial: só os campos `Some` são gravados (merge raso no documento).
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "Il nome è obbligatorio."))]
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "codice", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "descrizione", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(rename = "prezzo", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(rename = "prezzoAcquisto", skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,

    #[validate(range(min = 0, max = 100))]
    #[serde(rename = "iva", skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<i32>,

    #[validate(range(min = 0))]
    #[serde(rename = "quantita", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,

    #[serde(rename = "unita", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "fornitoreId", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,

    #[serde(rename = "codiceFornitori", skip_serializing_if = "Option::is_none")]
    pub supplier_code: Option<String>,

    #[serde(rename = "specifiche", skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,

    #[validate(range(min = 0))]
    #[serde(rename = "scortaMinima", skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i32>,

    #[serde(rename = "ubicazione", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(rename = "dataUltimoAcquisto", skip_serializing_if = "Option::is_none")]
    pub last_purchase_at: Option<DateTime<Utc>>,

    #[serde(rename = "note", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
