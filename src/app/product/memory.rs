//! In-process product store
//!
//! Mirrors the Postgres contract: ids come from a counter and are never
//! reused, `header` is unique, and the creation date is stamped on insert.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use super::error::{ProductError, ProductResult};
use super::model::{NewProduct, Product, ProductChanges};
use super::store::{ProductSession, ProductStore};

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

impl Table {
    fn header_taken(&self, header: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|p| p.header == header && Some(p.id) != except)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    type Session = MemoryProductSession;

    async fn acquire(&self) -> ProductResult<MemoryProductSession> {
        Ok(MemoryProductSession {
            table: Arc::clone(&self.table),
        })
    }
}

pub struct MemoryProductSession {
    table: Arc<RwLock<Table>>,
}

#[async_trait]
impl ProductSession for MemoryProductSession {
    async fn fetch_by_id(&mut self, id: i32) -> ProductResult<Product> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(ProductError::NotFound)
    }

    async fn insert(&mut self, product: NewProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;

        if table.header_taken(&product.header, None) {
            return Err(ProductError::Conflict);
        }

        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id space exhausted".to_string()))?;
        table.last_id = id;
        let created = Product {
            id,
            header: product.header,
            description: Some(product.description),
            creation_date: Utc::now(),
            owner: product.owner,
        };
        table.rows.insert(created.id, created.clone());

        info!(product_id = created.id, "Created product");
        Ok(created)
    }

    async fn apply_update(
        &mut self,
        product: Product,
        changes: ProductChanges,
    ) -> ProductResult<Product> {
        if changes.is_empty() {
            return Ok(product);
        }

        let mut table = self.table.write().await;

        if let Some(header) = &changes.header {
            if table.header_taken(header, Some(product.id)) {
                return Err(ProductError::Conflict);
            }
        }

        let stored = table
            .rows
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound)?;
        stored.apply_changes(changes);
        let updated = stored.clone();

        info!(product_id = updated.id, "Updated product");
        Ok(updated)
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        let mut table = self.table.write().await;

        table
            .rows
            .remove(&product.id)
            .ok_or(ProductError::NotFound)?;

        info!(product_id = product.id, "Deleted product");
        Ok(())
    }
}
