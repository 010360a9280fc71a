//! Document API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{DocumentRecord, DocumentRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route(
            "/:id",
            get(get_document).put(update_document).delete(delete_document),
        )
}

/// Request body for creating or updating a document.
///
/// Only `text` is accepted; ids are assigned server-side and unknown
/// fields are dropped.
#[derive(Debug, Deserialize)]
struct DocumentBody {
    text: String,
}

/// List all documents
async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<DocumentRecord>>> {
    let repo = DocumentRepository::new(state.db());
    let documents = repo.list().await?;
    Ok(Json(documents))
}

/// Create a new document
async fn create_document(
    State(state): State<AppState>,
    Json(body): Json<DocumentBody>,
) -> Result<(StatusCode, Json<DocumentRecord>)> {
    let repo = DocumentRepository::new(state.db());
    let document = repo.create(&body.text).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Get a specific document
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentRecord>> {
    let repo = DocumentRepository::new(state.db());
    let document = repo
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
    Ok(Json(document))
}

/// Replace a document's text
async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<DocumentBody>,
) -> Result<Json<DocumentRecord>> {
    let repo = DocumentRepository::new(state.db());
    let document = repo
        .update(&id, &body.text)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
    Ok(Json(document))
}

/// Delete a document and its annotations.
///
/// Idempotent: deleting a missing id still returns 204.
async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let repo = DocumentRepository::new(state.db());
    repo.delete_cascade(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
