//! Storage seam for products
//!
//! A [`ProductStore`] is the long-lived handle built at startup. Each request
//! acquires one [`ProductSession`] from it and drops the session when the
//! response is ready, on every exit path.

use async_trait::async_trait;

use super::error::ProductResult;
use super::model::{NewProduct, Product, ProductChanges};

#[async_trait]
pub trait ProductStore: Clone + Send + Sync + 'static {
    type Session: ProductSession;

    async fn acquire(&self) -> ProductResult<Self::Session>;
}

/// Operations available to a single request. Each mutating call commits
/// exactly one transaction or leaves storage untouched.
#[async_trait]
pub trait ProductSession: Send {
    /// Fails with `NotFound` when no row has this id.
    async fn fetch_by_id(&mut self, id: i32) -> ProductResult<Product>;

    /// Assigns the id and creation date. Fails with `Conflict` on a duplicate header.
    async fn insert(&mut self, product: NewProduct) -> ProductResult<Product>;

    /// Writes only the fields present in `changes`.
    async fn apply_update(
        &mut self,
        product: Product,
        changes: ProductChanges,
    ) -> ProductResult<Product>;

    async fn delete(&mut self, product: Product) -> ProductResult<()>;
}
