//! 数据库基础设施

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use super::config::DatabaseConfig;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        header VARCHAR(100) NOT NULL UNIQUE,
        description VARCHAR(2048),
        creation_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        owner VARCHAR(100) NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_products_owner ON products (owner)",
    // 2048 个多字节字符会超出 btree 索引行的 2704 字节上限
    "DROP INDEX IF EXISTS ix_products_description",
];

/// 连接池管理器：在 `main` 中创建，交给产品存储使用，关闭时显式释放
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            user = %config.user,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建 products 表及索引（已存在则跳过）
    pub async fn init_schema(&self) -> Result<(), Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
