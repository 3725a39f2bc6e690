// src/models/quote.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{models::product::Product, services::pricing};

// --- Stato del preventivo ---
// Rótulo livre: qualquer transição é permitida.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[default]
    #[serde(rename = "bozza")]
    Draft,
    #[serde(rename = "inviato")]
    Sent,
    #[serde(rename = "accettato")]
    Accepted,
    #[serde(rename = "rifiutato")]
    Rejected,
}

impl QuoteStatus {
    /// Valor gravado no documento (e usado no índice `stato`).
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "bozza",
            QuoteStatus::Sent => "inviato",
            QuoteStatus::Accepted => "accettato",
            QuoteStatus::Rejected => "rifiutato",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bozza" | "draft" => Ok(QuoteStatus::Draft),
            "inviato" | "sent" => Ok(QuoteStatus::Sent),
            "accettato" | "accepted" => Ok(QuoteStatus::Accepted),
            "rifiutato" | "rejected" => Ok(QuoteStatus::Rejected),
            other => Err(format!("Stato preventivo non valido: {}", other)),
        }
    }
}

// --- Cópia do produto no momento em que entrou no orçamento ---
// Tudo do produto menos a quantidade em estoque (a linha tem a sua própria).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "codice")]
    pub code: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "descrizione", default)]
    pub description: String,
    #[serde(rename = "prezzo")]
    pub price: Decimal,
    #[serde(rename = "prezzoAcquisto", default)]
    pub purchase_price: Decimal,
    #[serde(rename = "iva")]
    pub vat_rate: i32,
    #[serde(rename = "unita", default)]
    pub unit: String,
    #[serde(rename = "fornitoreId", default)]
    pub supplier_id: String,
    #[serde(rename = "codiceFornitori", default)]
    pub supplier_code: String,
    #[serde(rename = "specifiche", default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(rename = "scortaMinima", default)]
    pub min_stock: i32,
    #[serde(rename = "ubicazione", default)]
    pub location: String,
    #[serde(rename = "dataUltimoAcquisto", default, skip_serializing_if = "Option::is_none")]
    pub last_purchase_at: Option<DateTime<Utc>>,
    #[serde(rename = "note", default)]
    pub notes: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            code: p.code.clone(),
            category: p.category.clone(),
            description: p.description.clone(),
            price: p.price,
            purchase_price: p.purchase_price,
            vat_rate: p.vat_rate,
            unit: p.unit.clone(),
            supplier_id: p.supplier_id.clone(),
            supplier_code: p.supplier_code.clone(),
            specifications: p.specifications.clone(),
            min_stock: p.min_stock,
            location: p.location.clone(),
            last_purchase_at: p.last_purchase_at,
            notes: p.notes.clone(),
        }
    }
}

// --- Riga del preventivo ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,

    // Quantidade da linha (>= 1), não o estoque
    #[serde(rename = "quantita")]
    pub quantity: u32,

    // Ricarico (%) aplicado antes do desconto
    #[serde(rename = "ricarico")]
    pub markup: Decimal,

    // Sconto (%) aplicado depois do ricarico
    #[serde(rename = "sconto")]
    pub discount: Decimal,
}

impl QuoteItem {
    pub fn from_product(product: &Product, quantity: u32, markup: Decimal, discount: Decimal) -> Self {
        Self {
            product: ProductSnapshot::from(product),
            quantity,
            markup,
            discount,
        }
    }
}

// Como o documento chega do banco ou de fora: só as linhas contam.
// Totais gravados são ignorados e recalculados.
#[derive(Deserialize)]
struct StoredLines {
    #[serde(rename = "articoli", default)]
    items: Vec<QuoteItem>,
}

impl From<StoredLines> for PricedQuote {
    fn from(stored: StoredLines) -> Self {
        pricing::price_quote(stored.items)
    }
}

// --- Linhas + totais calculados ---
// Só o motor de preços (`services::pricing::price_quote`) monta este struct,
// inclusive na desserialização, então linhas e totais nunca andam separados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLines")]
pub struct PricedQuote {
    #[serde(rename = "articoli")]
    pub(crate) items: Vec<QuoteItem>,

    // Totale (imponibile + IVA)
    #[serde(rename = "totale")]
    pub(crate) total: Decimal,

    #[serde(rename = "totaleImponibile")]
    pub(crate) subtotal: Decimal,

    #[serde(rename = "totaleIva")]
    pub(crate) vat_total: Decimal,

    // Soma simples das porcentagens de desconto (não é valor em euro)
    #[serde(rename = "scontoTotale")]
    pub(crate) total_discount: Decimal,
}

impl PricedQuote {
    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn vat_total(&self) -> Decimal {
        self.vat_total
    }

    pub fn total_discount(&self) -> Decimal {
        self.total_discount
    }
}

// `dataCreazione` sempre com seis casas de fração: assim a ordem do texto no índice
// é a ordem cronológica e as buscas por intervalo funcionam direto no SQL.
pub(crate) mod creation_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn to_key(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_key(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// --- Preventivo ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "nomeCliente")]
    pub client_name: String,

    #[serde(rename = "emailCliente", default)]
    pub client_email: String,

    #[serde(flatten)]
    pub pricing: PricedQuote,

    // Gravada uma única vez, na criação
    #[serde(rename = "dataCreazione", with = "creation_date")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "stato")]
    pub status: QuoteStatus,

    #[serde(rename = "note", default)]
    pub notes: String,
}

impl Quote {
    pub fn items(&self) -> &[QuoteItem] {
        self.pricing.items()
    }
}

// Dados para criar um orçamento; `id` e `dataCreazione` são definidos pelo repositório.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub client_name: String,
    pub client_email: String,
    pub pricing: PricedQuote,
    pub status: QuoteStatus,
    pub notes: String,
}

// Atualização parcial. Não há campo para `dataCreazione`: ela é imutável.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuotePatch {
    #[serde(rename = "nomeCliente", skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(rename = "emailCliente", skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,

    // `None` achatado não gera nenhuma chave
    #[serde(flatten)]
    pub pricing: Option<PricedQuote>,

    #[serde(rename = "stato", skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,

    #[serde(rename = "note", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_italian_and_english_labels() {
        assert_eq!("bozza".parse::<QuoteStatus>(), Ok(QuoteStatus::Draft));
        assert_eq!("Sent".parse::<QuoteStatus>(), Ok(QuoteStatus::Sent));
        assert_eq!("ACCETTATO".parse::<QuoteStatus>(), Ok(QuoteStatus::Accepted));
        assert_eq!("rejected".parse::<QuoteStatus>(), Ok(QuoteStatus::Rejected));
        assert!("archiviato".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn status_display_matches_stored_label() {
        for status in [
            QuoteStatus::Draft,
            QuoteStatus::Sent,
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<QuoteStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::Value::String(status.as_str().to_string())
            );
        }
    }

    #[test]
    fn stored_totals_are_ignored_on_read() {
        let json = r#"{
            "articoli": [{
                "id": "1", "nome": "Cavo", "codice": "CAV010", "prezzo": "10", "iva": 22,
                "quantita": 3, "ricarico": "0", "sconto": "10"
            }],
            "totale": "1", "totaleImponibile": "1", "totaleIva": "1", "scontoTotale": "1"
        }"#;

        let priced: PricedQuote = serde_json::from_str(json).unwrap();

        assert_eq!(priced.subtotal(), Decimal::new(27, 0));
        assert_eq!(priced.vat_total(), Decimal::new(594, 2));
        assert_eq!(priced.total(), Decimal::new(3294, 2));
        assert_eq!(priced.total_discount(), Decimal::new(10, 0));
    }

    #[test]
    fn creation_date_is_stored_with_fixed_width() {
        let at = DateTime::parse_from_rfc3339("2026-01-05T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(creation_date::to_key(&at), "2026-01-05T09:30:00.000000Z");
    }
}
