// src/db/supplier_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{
        projection::Subscription,
        store::{Record, RecordStore, Table},
    },
    models::supplier::{Supplier, SupplierPatch},
};

impl Record for Supplier {
    const TABLE: Table = Table::Suppliers;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Clone)]
pub struct SupplierRepository {
    store: RecordStore<Supplier>,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { store: RecordStore::new(pool) }
    }

    pub async fn create(&self, mut supplier: Supplier) -> Result<Supplier, AppError> {
        supplier.id = self.store.insert(supplier.clone()).await?;
        Ok(supplier)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Supplier>, AppError> {
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Supplier>, AppError> {
        self.store.list_all().await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.store.count().await
    }

    pub async fn update(&self, id: &str, patch: &SupplierPatch) -> Result<Supplier, AppError> {
        self.store.update(id, patch).await
    }

    // Não verifica produtos que apontam para este fornecedor.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await
    }

    pub async fn find_by_legal_name(&self, legal_name: &str) -> Result<Vec<Supplier>, AppError> {
        self.store.find_by("ragioneSociale", legal_name).await
    }

    pub async fn find_by_vat_number(&self, vat_number: &str) -> Result<Vec<Supplier>, AppError> {
        self.store.find_by("partitaIva", vat_number).await
    }

    pub fn subscribe(&self) -> Subscription<Supplier> {
        self.store.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }

    pub async fn live(&self) -> Result<(Vec<Supplier>, Subscription<Supplier>), AppError> {
        self.store.live().await
    }
}
