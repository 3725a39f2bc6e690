// src/services/quote_service.rs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ProductRepository, QuoteRepository},
    models::quote::{NewQuote, PricedQuote, Quote, QuoteItem, QuotePatch, QuoteStatus},
    services::pricing,
};

// ---
// Entrada tipada: uma struct por produto escolhido (nada de campos "quantity_<id>")
// ---
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineInput {
    #[validate(length(min = 1, message = "Prodotto obbligatorio."))]
    pub product_id: String,

    #[validate(range(min = 1, message = "La quantità deve essere almeno 1."))]
    pub quantity: u32,

    // Porcentagens: não são limitadas aqui
    #[serde(default)]
    pub markup: Decimal,

    #[serde(default)]
    pub discount: Decimal,
}

impl QuoteLineInput {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            markup: Decimal::ZERO,
            discount: Decimal::ZERO,
        }
    }

    pub fn with_markup(mut self, markup: Decimal) -> Self {
        self.markup = markup;
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    #[validate(length(min = 1, message = "Il nome del cliente è obbligatorio."))]
    pub client_name: String,

    #[serde(default)]
    pub client_email: String,

    #[validate(nested)]
    #[serde(default)]
    pub lines: Vec<QuoteLineInput>,

    #[serde(default)]
    pub notes: String,
}

/// Filtra orçamentos pelo nome do cliente ou pelo id.
pub fn filter_quotes<'a>(quotes: &'a [Quote], term: &str) -> Vec<&'a Quote> {
    let needle = term.to_lowercase();
    quotes
        .iter()
        .filter(|q| {
            q.client_name.to_lowercase().contains(&needle) || q.id.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Clone)]
pub struct QuoteService {
    quotes: QuoteRepository,
    products: ProductRepository,
}

impl QuoteService {
    pub fn new(quotes: QuoteRepository, products: ProductRepository) -> Self {
        Self { quotes, products }
    }

    // Copia cada produto como está agora e calcula os totais.
    // Editar o produto depois não muda orçamentos já gravados.
    async fn price_lines(&self, lines: &[QuoteLineInput]) -> Result<PricedQuote, AppError> {
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self
                .products
                .find_by_id(&line.product_id)
                .await?
                .ok_or_else(|| AppError::not_found("products", &line.product_id))?;

            items.push(QuoteItem::from_product(&product, line.quantity, line.markup, line.discount));
        }
        Ok(pricing::price_quote(items))
    }

    pub async fn create_quote(&self, draft: QuoteDraft) -> Result<Quote, AppError> {
        draft.validate()?;
        let pricing = self.price_lines(&draft.lines).await?;

        let quote = self
            .quotes
            .create(NewQuote {
                client_name: draft.client_name,
                client_email: draft.client_email,
                pricing,
                status: QuoteStatus::Draft,
                notes: draft.notes,
            })
            .await?;

        tracing::info!(quote = %quote.id, total = %quote.pricing.total(), "preventivo creato");
        Ok(quote)
    }

    /// Substitui cliente, linhas e notas. Os totais são sempre recalculados;
    /// estado e data de criação ficam como estão.
    pub async fn update_quote(&self, id: &str, draft: QuoteDraft) -> Result<Quote, AppError> {
        draft.validate()?;
        let pricing = self.price_lines(&draft.lines).await?;

        let patch = QuotePatch {
            client_name: Some(draft.client_name),
            client_email: Some(draft.client_email),
            pricing: Some(pricing),
            status: None,
            notes: Some(draft.notes),
        };
        self.quotes.update(id, &patch).await
    }

    pub async fn set_status(&self, id: &str, status: QuoteStatus) -> Result<Quote, AppError> {
        let patch = QuotePatch {
            status: Some(status),
            ..Default::default()
        };
        let quote = self.quotes.update(id, &patch).await?;
        tracing::info!(quote = %id, status = %status, "stato preventivo aggiornato");
        Ok(quote)
    }

    pub async fn delete_quote(&self, id: &str) -> Result<(), AppError> {
        self.quotes.delete(id).await
    }

    pub async fn get_quote(&self, id: &str) -> Result<Quote, AppError> {
        self.quotes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("quotes", id))
    }

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        self.quotes.list_all().await
    }

    pub async fn search_quotes(&self, term: &str) -> Result<Vec<Quote>, AppError> {
        let all = self.quotes.list_all().await?;
        Ok(filter_quotes(&all, term).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_quantity_must_be_at_least_one() {
        let draft = QuoteDraft {
            client_name: "Rossi Impianti".into(),
            lines: vec![QuoteLineInput::new("1", 0)],
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn client_name_is_required() {
        let draft = QuoteDraft::default();
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("client_name"));
    }

    #[test]
    fn negative_discount_is_accepted_by_validation() {
        let draft = QuoteDraft {
            client_name: "Rossi Impianti".into(),
            lines: vec![QuoteLineInput::new("1", 2).with_discount(Decimal::new(-5, 0))],
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_deserializes_from_structured_input() {
        let draft: QuoteDraft = serde_json::from_str(
            r#"{ "clientName": "Bianchi", "lines": [ { "productId": "1", "quantity": 3, "markup": "10" } ] }"#,
        )
        .unwrap();

        assert_eq!(draft.lines[0].quantity, 3);
        assert_eq!(draft.lines[0].markup, Decimal::new(10, 0));
        assert!(draft.lines[0].discount.is_zero());
    }
}
