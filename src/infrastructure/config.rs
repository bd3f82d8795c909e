//! 环境变量配置

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{key}' has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    /// 进程内存储，重启后数据丢失
    Memory,
}

/// Postgres 连接配置，默认值仅用于本地开发
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub storage: StorageKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值查找函数构建配置，未设置的项使用开发默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            host: get("DB_HOST", "127.0.0.1"),
            port: parse("DB_PORT", get("DB_PORT", "5431"))?,
            name: get("DB_NAME", "products"),
            user: get("DB_USER", "app"),
            password: get("DB_PASSWORD", "secret"),
            max_connections: parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS", "20"))?,
        };

        let server = ServerConfig {
            host: get("APP_HOST", "127.0.0.1"),
            port: parse("APP_PORT", get("APP_PORT", "5000"))?,
        };

        let storage = match get("APP_STORAGE", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => StorageKind::Postgres,
            "memory" => StorageKind::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "APP_STORAGE",
                    value: get("APP_STORAGE", ""),
                })
            }
        };

        Ok(Self {
            database,
            server,
            storage,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
