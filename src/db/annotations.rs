//! Annotation store operations

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::model::{validate_span, Annotation, Entity, ValidationError};

/// Flat annotation record as persisted
///
/// The entity reference is denormalized to `entity_id` + `entity_label`;
/// the label column is a cached copy refreshed on read, not a second
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnnotationRecord {
    pub id: String,
    pub document_id: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub entity_id: String,
    pub entity_label: String,
}

impl AnnotationRecord {
    /// Reconstitute the value type from this record, re-running span
    /// validation. Useful when invariant checking is needed outside a
    /// persistence context.
    pub fn into_model(self) -> std::result::Result<Annotation, ValidationError> {
        Annotation::new(
            self.id,
            self.document_id,
            self.start_offset,
            self.end_offset,
            Entity::new(self.entity_id, self.entity_label),
        )
    }
}

/// Create annotation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub document_id: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub entity_id: String,
    pub entity_label: String,
}

/// Partial update request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnotation {
    pub start_offset: Option<i64>,
    pub end_offset: Option<i64>,
    pub entity_id: Option<String>,
    pub entity_label: Option<String>,
}

impl UpdateAnnotation {
    fn is_empty(&self) -> bool {
        self.start_offset.is_none()
            && self.end_offset.is_none()
            && self.entity_id.is_none()
            && self.entity_label.is_none()
    }
}

const SELECT_COLUMNS: &str = "CAST(id AS TEXT) AS id, document_id, start_offset, end_offset, \
                              entity_id, entity_label";

/// Annotation repository
pub struct AnnotationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AnnotationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new annotation and return it with its assigned id.
    ///
    /// The span is validated before the write; there is no foreign-key
    /// check against the documents table.
    pub async fn create(&self, data: &CreateAnnotation) -> Result<AnnotationRecord> {
        validate_span(data.start_offset, data.end_offset)?;

        let result = sqlx::query(
            r#"
            INSERT INTO annotations (
                document_id, start_offset, end_offset, entity_id, entity_label
            ) VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.document_id)
        .bind(data.start_offset)
        .bind(data.end_offset)
        .bind(&data.entity_id)
        .bind(&data.entity_label)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid().to_string();
        self.get(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to fetch created annotation".to_string()))
    }

    /// Retrieve an annotation by id; `None` when it does not exist
    pub async fn get(&self, id: &str) -> Result<Option<AnnotationRecord>> {
        let annotation = sqlx::query_as::<_, AnnotationRecord>(&format!(
            "SELECT {} FROM annotations WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(annotation)
    }

    /// Return all annotations, optionally filtered by document
    pub async fn list(&self, document_id: Option<&str>) -> Result<Vec<AnnotationRecord>> {
        let annotations = match document_id {
            None => {
                sqlx::query_as::<_, AnnotationRecord>(&format!(
                    "SELECT {} FROM annotations",
                    SELECT_COLUMNS
                ))
                .fetch_all(self.pool)
                .await?
            }
            Some(document_id) => {
                sqlx::query_as::<_, AnnotationRecord>(&format!(
                    "SELECT {} FROM annotations WHERE document_id = ?",
                    SELECT_COLUMNS
                ))
                .bind(document_id)
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(annotations)
    }

    /// Apply a partial update and return the updated annotation.
    ///
    /// An empty update degenerates to a plain read. The resulting span
    /// (current row merged with the patch) is validated before anything is
    /// written, so a patch can never persist an invalid span.
    pub async fn update(
        &self,
        id: &str,
        data: &UpdateAnnotation,
    ) -> Result<Option<AnnotationRecord>> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };
        if data.is_empty() {
            return Ok(Some(current));
        }

        let start = data.start_offset.unwrap_or(current.start_offset);
        let end = data.end_offset.unwrap_or(current.end_offset);
        validate_span(start, end)?;

        // Build dynamic update query
        let mut set_clauses = Vec::new();
        if data.start_offset.is_some() {
            set_clauses.push("start_offset = ?");
        }
        if data.end_offset.is_some() {
            set_clauses.push("end_offset = ?");
        }
        if data.entity_id.is_some() {
            set_clauses.push("entity_id = ?");
        }
        if data.entity_label.is_some() {
            set_clauses.push("entity_label = ?");
        }

        let query = format!(
            "UPDATE annotations SET {} WHERE id = ?",
            set_clauses.join(", ")
        );

        let mut sql_query = sqlx::query(&query);
        if let Some(start_offset) = data.start_offset {
            sql_query = sql_query.bind(start_offset);
        }
        if let Some(end_offset) = data.end_offset {
            sql_query = sql_query.bind(end_offset);
        }
        if let Some(ref entity_id) = data.entity_id {
            sql_query = sql_query.bind(entity_id);
        }
        if let Some(ref entity_label) = data.entity_label {
            sql_query = sql_query.bind(entity_label);
        }
        sql_query = sql_query.bind(id);

        sql_query.execute(self.pool).await?;

        self.get(id).await
    }

    /// Delete an annotation.
    ///
    /// Idempotent: deleting a missing id returns `false`, not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, DocumentRepository};

    fn greeting(document_id: &str) -> CreateAnnotation {
        CreateAnnotation {
            document_id: document_id.to_string(),
            start_offset: 0,
            end_offset: 5,
            entity_id: "e1".to_string(),
            entity_label: "GREETING".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_get_delete_scenario() {
        let pool = test_pool().await;
        let docs = DocumentRepository::new(&pool);
        let anns = AnnotationRepository::new(&pool);

        let doc = docs.create("Hello world").await.unwrap();
        let ann = anns.create(&greeting(&doc.id)).await.unwrap();

        let fetched = anns.get(&ann.id).await.unwrap().unwrap();
        assert_eq!(fetched.entity_label, "GREETING");
        assert_eq!(fetched.start_offset, 0);
        assert_eq!(fetched.end_offset, 5);

        assert!(anns.delete(&ann.id).await.unwrap());
        assert!(anns.get(&ann.id).await.unwrap().is_none());

        // Second delete is not an error.
        assert!(!anns.delete(&ann.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_span() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let mut data = greeting("1");
        data.start_offset = 5;
        data.end_offset = 5;

        let err = anns.create(&data).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidSpan { start: 5, end: 5 })
        ));

        // Nothing was persisted.
        assert!(anns.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_document() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let a1 = anns.create(&greeting("1")).await.unwrap();
        let a2 = anns.create(&greeting("1")).await.unwrap();
        let other = anns.create(&greeting("2")).await.unwrap();

        let all = anns.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = anns.list(Some("1")).await.unwrap();
        let ids: Vec<&str> = filtered.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(filtered.len(), 2);
        assert!(ids.contains(&a1.id.as_str()));
        assert!(ids.contains(&a2.id.as_str()));
        assert!(!ids.contains(&other.id.as_str()));
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_supplied_fields() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let ann = anns.create(&greeting("1")).await.unwrap();

        let updated = anns
            .update(
                &ann.id,
                &UpdateAnnotation {
                    start_offset: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.start_offset, 1);
        assert_eq!(updated.end_offset, ann.end_offset);
        assert_eq!(updated.entity_id, ann.entity_id);
        assert_eq!(updated.entity_label, ann.entity_label);
    }

    #[tokio::test]
    async fn test_entity_pair_updates_together() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let ann = anns.create(&greeting("1")).await.unwrap();

        let updated = anns
            .update(
                &ann.id,
                &UpdateAnnotation {
                    entity_id: Some("e2".to_string()),
                    entity_label: Some("FAREWELL".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.entity_id, "e2");
        assert_eq!(updated.entity_label, "FAREWELL");
        assert_eq!(updated.start_offset, ann.start_offset);
    }

    #[tokio::test]
    async fn test_empty_update_is_a_noop_read() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let ann = anns.create(&greeting("1")).await.unwrap();
        let updated = anns
            .update(&ann.id, &UpdateAnnotation::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated, ann);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let result = anns
            .update(
                "99",
                &UpdateAnnotation {
                    start_offset: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_resulting_span() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let ann = anns.create(&greeting("1")).await.unwrap();

        // Moving start past the current end would invert the span.
        let err = anns
            .update(
                &ann.id,
                &UpdateAnnotation {
                    start_offset: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidSpan { start: 10, end: 5 })
        ));

        // The row is unchanged.
        let current = anns.get(&ann.id).await.unwrap().unwrap();
        assert_eq!(current.start_offset, 0);
        assert_eq!(current.end_offset, 5);
    }

    #[tokio::test]
    async fn test_record_reconstitutes_into_model() {
        let pool = test_pool().await;
        let anns = AnnotationRepository::new(&pool);

        let record = anns.create(&greeting("1")).await.unwrap();
        let model = record.clone().into_model().unwrap();

        assert_eq!(model.id(), record.id);
        assert_eq!(model.document_id(), "1");
        assert_eq!(model.entity(), &Entity::new("e1", "GREETING"));
    }
}
