//! Product HTTP handlers

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::{
    error::ProductError,
    model::{NewProduct, Product, ProductChanges},
    schema::{validate, CreateProduct, UpdateProduct},
    store::{ProductSession, ProductStore},
};
use crate::core::{
    error::ApiError,
    extract::{JsonBody, ProductId},
};

#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

/// A storage session scoped to one request. It is acquired before the
/// handler body runs and released when the handler returns.
pub struct DbSession<T>(pub T);

#[async_trait]
impl<S: ProductStore> FromRequestParts<AppState<S>> for DbSession<S::Session> {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbSession(state.store.acquire().await?))
    }
}

pub fn routes<S: ProductStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/products/", post(create_product::<S>))
        .route(
            "/products/:id/",
            get(get_product::<S>)
                .patch(update_product::<S>)
                .delete(delete_product::<S>),
        )
}

pub async fn create_product<S: ProductStore>(
    DbSession(mut session): DbSession<S::Session>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: CreateProduct = validate(body).map_err(ProductError::Validation)?;
    let product = session.insert(NewProduct::from(input)).await?;
    Ok(Json(json!({ "id": product.id })))
}

pub async fn get_product<S: ProductStore>(
    ProductId(id): ProductId,
    DbSession(mut session): DbSession<S::Session>,
) -> Result<Json<Product>, ApiError> {
    let product = session.fetch_by_id(id).await?;
    Ok(Json(product))
}

pub async fn update_product<S: ProductStore>(
    ProductId(id): ProductId,
    DbSession(mut session): DbSession<S::Session>,
    JsonBody(body): JsonBody,
) -> Result<Json<Product>, ApiError> {
    let input: UpdateProduct = validate(body).map_err(ProductError::Validation)?;
    let product = session.fetch_by_id(id).await?;
    let product = session
        .apply_update(product, ProductChanges::from(input))
        .await?;
    Ok(Json(product))
}

pub async fn delete_product<S: ProductStore>(
    ProductId(id): ProductId,
    DbSession(mut session): DbSession<S::Session>,
) -> Result<Json<Value>, ApiError> {
    let product = session.fetch_by_id(id).await?;
    session.delete(product).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
