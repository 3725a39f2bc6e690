// src/config.rs

use std::env;

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{self, ProductRepository, QuoteRepository, SupplierRepository},
    services::{CatalogService, DashboardService, QuoteService},
};

const DEFAULT_DATABASE_URL: &str = "sqlite://elettrogest.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub seed_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed_on_start: true,
        }
    }
}

impl AppConfig {
    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = var("DATABASE_URL") {
            config.database_url = url;
        }

        if let Some(raw) = var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("DATABASE_MAX_CONNECTIONS inválido: '{}'", raw)))?;
        }

        if let Some(raw) = var("SEED_ON_START") {
            config.seed_on_start = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(AppError::Config(format!("SEED_ON_START inválido: '{}'", raw))),
            };
        }

        Ok(config)
    }

    /// Banco só em memória (usado nos testes).
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            seed_on_start: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

// O estado da aplicação, montado uma vez no início e passado para quem precisar.
// Nada de estado global.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub product_repo: ProductRepository,
    pub supplier_repo: SupplierRepository,
    pub quote_repo: QuoteRepository,
    pub catalog_service: CatalogService,
    pub quote_service: QuoteService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self, AppError> {
        let db_pool = db::connect(config).await?;
        Ok(Self::from_pool(db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool) -> Self {
        let product_repo = ProductRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(product_repo.clone(), supplier_repo.clone());
        let quote_service = QuoteService::new(quote_repo.clone(), product_repo.clone());
        let dashboard_service =
            DashboardService::new(product_repo.clone(), quote_repo.clone(), supplier_repo.clone());

        Self {
            db_pool,
            product_repo,
            supplier_repo,
            quote_repo,
            catalog_service,
            quote_service,
            dashboard_service,
        }
    }

    pub async fn seed(&self) -> Result<db::SeedReport, AppError> {
        db::seed_if_empty(&self.supplier_repo, &self.product_repo).await
    }
}
