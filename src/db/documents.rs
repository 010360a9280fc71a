//! Document store operations

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};

/// Flat document record as persisted
///
/// Ids are assigned by SQLite's autoincrement counter and surfaced as
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentRecord {
    pub id: String,
    pub text: String,
}

/// Document repository
pub struct DocumentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new document and return it with its assigned id
    pub async fn create(&self, text: &str) -> Result<DocumentRecord> {
        let result = sqlx::query("INSERT INTO documents (text) VALUES (?)")
            .bind(text)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid().to_string();
        self.get(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to fetch created document".to_string()))
    }

    /// Retrieve a document by id; `None` when it does not exist
    pub async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let document = sqlx::query_as::<_, DocumentRecord>(
            "SELECT CAST(id AS TEXT) AS id, text FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(document)
    }

    /// Return all documents; order is unspecified
    pub async fn list(&self) -> Result<Vec<DocumentRecord>> {
        let documents =
            sqlx::query_as::<_, DocumentRecord>("SELECT CAST(id AS TEXT) AS id, text FROM documents")
                .fetch_all(self.pool)
                .await?;

        Ok(documents)
    }

    /// Overwrite the document text unconditionally, then read the row back.
    ///
    /// Returns `None` when the id does not exist. No optimistic concurrency
    /// check: write and read-back are separate statements.
    pub async fn update(&self, id: &str, text: &str) -> Result<Option<DocumentRecord>> {
        sqlx::query("UPDATE documents SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(self.pool)
            .await?;

        self.get(id).await
    }

    /// Delete a document, leaving its annotations in place.
    ///
    /// Idempotent: deleting a missing id returns `false`, not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a document and its annotations in one transaction.
    ///
    /// This is the variant the HTTP layer uses; [`delete`](Self::delete)
    /// keeps the plain no-cascade behavior for callers that want it.
    pub async fn delete_cascade(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM annotations WHERE document_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
