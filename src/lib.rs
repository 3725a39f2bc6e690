//! Gestão de estoque, fornecedores e orçamentos de uma loja de material elétrico.
//!
//! Um banco SQLite local guarda as três tabelas; os repositórios publicam o conteúdo
//! atualizado de cada tabela para os observadores depois de cada mutação.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};
