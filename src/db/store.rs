// src/db/store.rs

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use sqlx::{Executor, Sqlite, SqlitePool};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::projection::{Projection, Subscription},
};

// As três tabelas do banco local e as chaves com índice secundário de cada uma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Products,
    Quotes,
    Suppliers,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Products => "products",
            Table::Quotes => "quotes",
            Table::Suppliers => "suppliers",
        }
    }

    /// Chaves do documento JSON com índice (ver a migração).
    pub fn indexes(&self) -> &'static [&'static str] {
        match self {
            Table::Products => &["nome", "codice", "categoria", "fornitoreId"],
            Table::Quotes => &["nomeCliente", "dataCreazione", "stato"],
            Table::Suppliers => &["ragioneSociale", "partitaIva"],
        }
    }
}

/// Uma linha de tabela: documento JSON com um `id` único.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: Table;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

// Merge raso: as chaves do patch sobrescrevem as do documento, menos o `id`.
fn merge_fields(document: &mut Value, patch: Map<String, Value>) -> Result<(), AppError> {
    let Value::Object(fields) = document else {
        return Err(AppError::Serialization(<serde_json::Error as serde::de::Error>::custom(
            "o documento gravado não é um objeto JSON",
        )));
    };
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key, value);
    }
    Ok(())
}

// O store genérico por tabela. Toda mutação passa por aqui.
pub struct RecordStore<T: Record> {
    pool: SqlitePool,
    projection: Projection<T>,
    // Uma operação de escrita por vez em cada tabela
    write_lock: Arc<Mutex<()>>,
}

impl<T: Record> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            projection: self.projection.clone(),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            projection: Projection::new(T::TABLE.name()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn table(&self) -> &'static str {
        T::TABLE.name()
    }

    // ---
    // Leitura
    // ---

    async fn fetch_all<'e, E>(executor: E) -> Result<Vec<T>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("SELECT body FROM {} ORDER BY rowid", T::TABLE.name());
        let bodies: Vec<String> = sqlx::query_scalar(&sql).fetch_all(executor).await?;
        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(AppError::from))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let sql = format!("SELECT body FROM {} WHERE id = ?1", self.table());
        let body: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(body.map(|b| serde_json::from_str(&b)).transpose()?)
    }

    /// Todas as linhas, na ordem de inserção.
    pub async fn list_all(&self) -> Result<Vec<T>, AppError> {
        Self::fetch_all(&self.pool).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table());
        let total: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(total)
    }

    // Só chaves conhecidas entram no SQL
    fn index_key(&self, index: &str) -> Result<&'static str, AppError> {
        T::TABLE
            .indexes()
            .iter()
            .find(|k| **k == index)
            .copied()
            .ok_or_else(|| AppError::UnknownIndex {
                table: self.table(),
                index: index.to_string(),
            })
    }

    /// Busca por um índice secundário (igualdade exata sobre a chave do documento).
    pub async fn find_by(&self, index: &str, value: &str) -> Result<Vec<T>, AppError> {
        let key = self.index_key(index)?;

        let sql = format!(
            "SELECT body FROM {} WHERE json_extract(body, '$.{}') = ?1 ORDER BY rowid",
            self.table(),
            key
        );
        let bodies: Vec<String> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(table = self.table(), index = key, hits = bodies.len(), "busca por índice");

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(AppError::from))
            .collect()
    }

    /// Busca por intervalo `[from, to)` num índice secundário, comparando o texto gravado.
    pub async fn find_in_range(&self, index: &str, from: &str, to: &str) -> Result<Vec<T>, AppError> {
        let key = self.index_key(index)?;

        let sql = format!(
            "SELECT body FROM {table} WHERE json_extract(body, '$.{key}') >= ?1 \
             AND json_extract(body, '$.{key}') < ?2 ORDER BY rowid",
            table = self.table(),
            key = key
        );
        let bodies: Vec<String> = sqlx::query_scalar(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(table = self.table(), index = key, hits = bodies.len(), "busca por intervalo");

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(AppError::from))
            .collect()
    }

    // ---
    // Escrita
    // ---
    // Cada mutação: lock da tabela -> transação -> snapshot -> commit -> publica.
    // O snapshot sai antes de a chamada retornar.

    /// Insere a linha. Mantém o `id` informado; se vier vazio, gera um UUID.
    pub async fn insert(&self, mut record: T) -> Result<String, AppError> {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }
        let id = record.id().to_string();
        let body = serde_json::to_string(&record)?;

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let sql = format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", self.table());
        sqlx::query(&sql)
            .bind(&id)
            .bind(&body)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateId {
                            table: self.table(),
                            id: id.clone(),
                        };
                    }
                }
                e.into()
            })?;

        let snapshot = Self::fetch_all(&mut *tx).await?;
        tx.commit().await?;
        self.projection.publish(snapshot);

        tracing::info!(table = self.table(), id = %id, "registro inserido");
        Ok(id)
    }

    /// Mescla os campos de `patch` na linha existente e devolve o registro resultante.
    pub async fn update<P>(&self, id: &str, patch: &P) -> Result<T, AppError>
    where
        P: Serialize + ?Sized,
    {
        let fields = match serde_json::to_value(patch)? {
            Value::Object(fields) => fields,
            _ => {
                return Err(AppError::Serialization(<serde_json::Error as serde::de::Error>::custom(
                    "o patch precisa ser um objeto JSON",
                )));
            }
        };

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT body FROM {} WHERE id = ?1", self.table());
        let body: Option<String> = sqlx::query_scalar(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let body = body.ok_or_else(|| AppError::not_found(self.table(), id))?;

        let mut document: Value = serde_json::from_str(&body)?;
        merge_fields(&mut document, fields)?;
        // Volta para o tipo: um merge que quebra o formato é rejeitado aqui
        let merged: T = serde_json::from_value(document)?;
        let new_body = serde_json::to_string(&merged)?;

        let update = format!("UPDATE {} SET body = ?1 WHERE id = ?2", self.table());
        sqlx::query(&update)
            .bind(&new_body)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let snapshot = Self::fetch_all(&mut *tx).await?;
        tx.commit().await?;
        self.projection.publish(snapshot);

        tracing::info!(table = self.table(), id = %id, "registro atualizado");
        Ok(merged)
    }

    /// Remove a linha. Apagar um id inexistente não é erro.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let sql = format!("DELETE FROM {} WHERE id = ?1", self.table());
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            tx.commit().await?;
            tracing::debug!(table = self.table(), id = %id, "nada para remover");
            return Ok(());
        }

        let snapshot = Self::fetch_all(&mut *tx).await?;
        tx.commit().await?;
        self.projection.publish(snapshot);

        tracing::info!(table = self.table(), id = %id, "registro removido");
        Ok(())
    }

    // ---
    // Observadores
    // ---

    /// Recebe o conteúdo completo da tabela depois de cada mutação.
    pub fn subscribe(&self) -> Subscription<T> {
        self.projection.subscribe()
    }

    /// Conteúdo atual + inscrição, sem janela para perder uma mutação entre os dois.
    pub async fn live(&self) -> Result<(Vec<T>, Subscription<T>), AppError> {
        let _guard = self.write_lock.lock().await;
        let current = self.list_all().await?;
        Ok((current, self.projection.subscribe()))
    }

    pub fn observer_count(&self) -> usize {
        self.projection.observer_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_only_given_keys() {
        let mut doc = json!({ "id": "1", "nome": "Cavo", "prezzo": "3.50" });
        let patch = json!({ "prezzo": "4.00" });
        let Value::Object(fields) = patch else { unreachable!() };

        merge_fields(&mut doc, fields).unwrap();

        assert_eq!(doc, json!({ "id": "1", "nome": "Cavo", "prezzo": "4.00" }));
    }

    #[test]
    fn merge_never_changes_the_id() {
        let mut doc = json!({ "id": "1", "nome": "Cavo" });
        let patch = json!({ "id": "2", "nome": "Cavo 3G1.5" });
        let Value::Object(fields) = patch else { unreachable!() };

        merge_fields(&mut doc, fields).unwrap();

        assert_eq!(doc["id"], "1");
        assert_eq!(doc["nome"], "Cavo 3G1.5");
    }

    #[test]
    fn indexes_match_the_lookup_keys() {
        assert!(Table::Products.indexes().contains(&"fornitoreId"));
        assert!(Table::Quotes.indexes().contains(&"stato"));
        assert!(Table::Suppliers.indexes().contains(&"partitaIva"));
    }
}
