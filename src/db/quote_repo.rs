// src/db/quote_repo.rs

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{
        projection::Subscription,
        store::{Record, RecordStore, Table},
    },
    models::quote::{creation_date, NewQuote, Quote, QuotePatch, QuoteStatus},
};

impl Record for Quote {
    const TABLE: Table = Table::Quotes;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// O repositório de orçamentos.
// Única regra própria: `dataCreazione` é carimbada na criação e nunca mais muda.
#[derive(Clone)]
pub struct QuoteRepository {
    store: RecordStore<Quote>,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { store: RecordStore::new(pool) }
    }

    pub async fn create(&self, new_quote: NewQuote) -> Result<Quote, AppError> {
        let mut quote = Quote {
            id: String::new(),
            client_name: new_quote.client_name,
            client_email: new_quote.client_email,
            pricing: new_quote.pricing,
            // Mesma precisão do texto gravado
            created_at: Utc::now().trunc_subsecs(6),
            status: new_quote.status,
            notes: new_quote.notes,
        };
        quote.id = self.store.insert(quote.clone()).await?;
        Ok(quote)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Quote>, AppError> {
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        self.store.list_all().await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.store.count().await
    }

    // `QuotePatch` não tem campo de data: a data de criação fica como está.
    pub async fn update(&self, id: &str, patch: &QuotePatch) -> Result<Quote, AppError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await
    }

    pub async fn find_by_client(&self, client_name: &str) -> Result<Vec<Quote>, AppError> {
        self.store.find_by("nomeCliente", client_name).await
    }

    pub async fn find_by_status(&self, status: QuoteStatus) -> Result<Vec<Quote>, AppError> {
        self.store.find_by("stato", status.as_str()).await
    }

    /// Orçamentos criados em `[from, to)`.
    pub async fn find_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Quote>, AppError> {
        self.store
            .find_in_range(
                "dataCreazione",
                &creation_date::to_key(&from),
                &creation_date::to_key(&to),
            )
            .await
    }

    pub fn subscribe(&self) -> Subscription<Quote> {
        self.store.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }

    pub async fn live(&self) -> Result<(Vec<Quote>, Subscription<Quote>), AppError> {
        self.store.live().await
    }
}
