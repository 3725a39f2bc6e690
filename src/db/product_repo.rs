// src/db/product_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{
        projection::Subscription,
        store::{Record, RecordStore, Table},
    },
    models::product::{Product, ProductPatch},
};

impl Record for Product {
    const TABLE: Table = Table::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// O repositório de produtos: repassa tudo ao store da tabela 'products'.
#[derive(Clone)]
pub struct ProductRepository {
    store: RecordStore<Product>,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { store: RecordStore::new(pool) }
    }

    pub async fn create(&self, mut product: Product) -> Result<Product, AppError> {
        product.id = self.store.insert(product.clone()).await?;
        Ok(product)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        self.store.list_all().await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.store.count().await
    }

    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, AppError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await
    }

    // --- Buscas pelos índices secundários ---

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
        self.store.find_by("nome", name).await
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Vec<Product>, AppError> {
        self.store.find_by("codice", code).await
    }

    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.store.find_by("categoria", category).await
    }

    pub async fn find_by_supplier(&self, supplier_id: &str) -> Result<Vec<Product>, AppError> {
        self.store.find_by("fornitoreId", supplier_id).await
    }

    // --- Observadores ---

    pub fn subscribe(&self) -> Subscription<Product> {
        self.store.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }

    pub async fn live(&self) -> Result<(Vec<Product>, Subscription<Product>), AppError> {
        self.store.live().await
    }
}
