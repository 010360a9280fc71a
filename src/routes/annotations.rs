//! Annotation API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{AnnotationRecord, AnnotationRepository, CreateAnnotation, UpdateAnnotation};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the annotations router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_annotations).post(create_annotation))
        .route(
            "/:id",
            get(get_annotation)
                .patch(update_annotation)
                .delete(delete_annotation),
        )
}

/// Query parameters for listing annotations
#[derive(Debug, Deserialize)]
struct ListParams {
    document_id: Option<String>,
}

/// List all annotations, optionally filtered by document
async fn list_annotations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AnnotationRecord>>> {
    let repo = AnnotationRepository::new(state.db());
    let annotations = repo.list(params.document_id.as_deref()).await?;
    Ok(Json(annotations))
}

/// Create a new annotation
async fn create_annotation(
    State(state): State<AppState>,
    Json(data): Json<CreateAnnotation>,
) -> Result<(StatusCode, Json<AnnotationRecord>)> {
    let repo = AnnotationRepository::new(state.db());
    let annotation = repo.create(&data).await?;
    Ok((StatusCode::CREATED, Json(annotation)))
}

/// Get a specific annotation
async fn get_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnnotationRecord>> {
    let repo = AnnotationRepository::new(state.db());
    let annotation = repo
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Annotation not found".to_string()))?;
    Ok(Json(annotation))
}

/// Apply a partial update to an annotation
async fn update_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateAnnotation>,
) -> Result<Json<AnnotationRecord>> {
    let repo = AnnotationRepository::new(state.db());
    let annotation = repo
        .update(&id, &data)
        .await?
        .ok_or_else(|| AppError::NotFound("Annotation not found".to_string()))?;
    Ok(Json(annotation))
}

/// Delete an annotation.
///
/// Idempotent: deleting a missing id still returns 204.
async fn delete_annotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let repo = AnnotationRepository::new(state.db());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
