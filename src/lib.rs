//! # Product service
//!
//! A small HTTP service that creates, reads, updates and deletes products
//! stored in a single Postgres table.
//!
//! - `app`: the product resource (model, schemas, storage, handlers)
//! - `core`: error mapping, extractors and middleware shared by handlers
//! - `infrastructure`: configuration, database pool and logging

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::app::product::{handler, AppState, ProductStore};
use crate::core::{error::ApiError, middleware::request_logging_middleware};

/// Builds the full application router over the given store.
pub fn build_router<S: ProductStore>(store: S) -> Router {
    handler::routes::<S>()
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(AppState { store })
}

async fn fallback() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
