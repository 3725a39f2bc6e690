// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro único, com `thiserror` para melhor ergonomia.
// Repositórios e serviços propagam sempre este tipo; quem chama decide a mensagem.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Registro '{id}' não encontrado na tabela '{table}'")]
    NotFound { table: &'static str, id: String },

    #[error("Já existe um registro '{id}' na tabela '{table}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("A tabela '{table}' não tem índice '{index}'")]
    UnknownIndex { table: &'static str, index: String },

    // Falha do motor de armazenamento (pool fechada, disco, corrupção...)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro ao executar as migrações: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    // O documento JSON gravado não bate com o tipo esperado
    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    Config(String),
}

impl AppError {
    /// Mensagem curta para mostrar na tela (as views antigas só tinham um `alert` genérico).
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "Uno o più campi non sono validi.",
            AppError::NotFound { .. } => "L'elemento richiesto non esiste più.",
            AppError::DuplicateId { .. } => "Esiste già un elemento con questo identificativo.",
            ref e => {
                tracing::error!("Erro interno: {}", e);
                "Si è verificato un errore durante il salvataggio."
            }
        }
    }

    /// Erros do motor de armazenamento (a classe "StorageError").
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_) | AppError::MigrationError(_) | AppError::Serialization(_)
        )
    }

    pub(crate) fn not_found(table: &'static str, id: &str) -> Self {
        AppError::NotFound { table, id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_a_storage_error() {
        let err = AppError::not_found("products", "42");
        assert!(!err.is_storage());
        assert_eq!(err.to_string(), "Registro '42' não encontrado na tabela 'products'");
    }

    #[test]
    fn pool_closed_is_a_storage_error() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(err.is_storage());
        assert_eq!(err.user_message(), "Si è verificato un errore durante il salvataggio.");
    }
}
