// src/models/supplier.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

// E-mail é opcional no cadastro: vazio passa, preenchido precisa ser válido.
fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Indirizzo email non valido.".into());
    Err(err)
}

// --- Fornitore ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Supplier {
    #[serde(default)]
    pub id: String,

    // Razão social
    #[validate(length(min = 1, message = "La ragione sociale è obbligatoria."))]
    #[serde(rename = "ragioneSociale")]
    pub legal_name: String,

    // Partita IVA
    #[serde(rename = "partitaIva", default)]
    pub vat_number: String,

    #[serde(rename = "indirizzo", default)]
    pub address: String,

    #[validate(custom(function = "validate_optional_email"))]
    #[serde(default)]
    pub email: String,

    #[serde(rename = "telefono", default)]
    pub phone: String,

    #[serde(rename = "note", default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct SupplierPatch {
    #[validate(length(min = 1, message = "La ragione sociale è obbligatoria."))]
    #[serde(rename = "ragioneSociale", skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,

    #[serde(rename = "partitaIva", skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    #[serde(rename = "indirizzo", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[validate(custom(function = "validate_optional_email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "note", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
