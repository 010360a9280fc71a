//! Route modules for Marginalia Server

pub mod annotations;
pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/documents", documents::router())
        .nest("/annotations", annotations::router())
        .with_state(state)
}
