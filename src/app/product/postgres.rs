//! Postgres-backed product store

use async_trait::async_trait;
use sqlx::{pool::PoolConnection, Connection, PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::error::{map_write_error, ProductError, ProductResult};
use super::model::{NewProduct, Product, ProductChanges};
use super::store::{ProductSession, ProductStore};

const COLUMNS: &str = "id, header, description, creation_date, owner";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    type Session = PgProductSession;

    async fn acquire(&self) -> ProductResult<PgProductSession> {
        let conn = self.pool.acquire().await?;
        Ok(PgProductSession { conn })
    }
}

/// One pooled connection, returned to the pool when dropped.
pub struct PgProductSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl ProductSession for PgProductSession {
    async fn fetch_by_id(&mut self, id: i32) -> ProductResult<Product> {
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(ProductError::NotFound)
    }

    async fn insert(&mut self, product: NewProduct) -> ProductResult<Product> {
        let mut tx = self.conn.begin().await?;

        let created = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (header, description, owner) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&product.header)
        .bind(&product.description)
        .bind(&product.owner)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await.map_err(map_write_error)?;

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

        let mut query = QueryBuilder::<Postgres>::new("UPDATE products SET ");
        let mut assignments = query.separated(", ");
        if let Some(header) = changes.header {
            assignments.push("header = ").push_bind_unseparated(header);
        }
        // `Some(None)` binds NULL.
        if let Some(description) = changes.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description);
        }
        if let Some(owner) = changes.owner {
            assignments.push("owner = ").push_bind_unseparated(owner);
        }
        query.push(" WHERE id = ").push_bind(product.id);
        query.push(format!(" RETURNING {COLUMNS}"));

        let mut tx = self.conn.begin().await?;

        let updated = query
            .build_query_as::<Product>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_write_error)?
            .ok_or(ProductError::NotFound)?;

        tx.commit().await.map_err(map_write_error)?;

        info!(product_id = updated.id, "Updated product");
        Ok(updated)
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        let mut tx = self.conn.begin().await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound);
        }

        tx.commit().await?;

        info!(product_id = product.id, "Deleted product");
        Ok(())
    }
}
