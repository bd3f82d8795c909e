//! 核心错误处理模块
//!
//! 处理器返回的所有错误都经由 [`ApiError`] 转换为响应，
//! 响应体统一为只含 `error` 字段的 JSON 对象。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::app::product::ProductError;
use crate::infrastructure::config::ConfigError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(Value),
    NotFound(String),
    Conflict(String),
    /// 详情只写日志，不返回给客户端
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Value::String(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, Value::String(msg)),
            ApiError::InternalServerError(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String("internal server error".to_string()),
                )
            }
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::Validation(violation) => ApiError::BadRequest(json!(violation)),
            ProductError::NotFound => ApiError::NotFound(message),
            ProductError::Conflict => ApiError::Conflict(message),
            ProductError::Storage(_) | ProductError::Internal(_) => {
                ApiError::InternalServerError(message)
            }
        }
    }
}

/// 启动阶段的致命错误
#[derive(Debug, Error)]
pub enum BootError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::schema::Violation;

    async fn body_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let response = ApiError::from(ProductError::NotFound).into_response();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "product not found" }));
    }

    #[tokio::test]
    async fn test_conflict_mapping() {
        let response = ApiError::from(ProductError::Conflict).into_response();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "product already exists" }));
    }

    #[tokio::test]
    async fn test_validation_mapping() {
        let violation = Violation::new(&["owner"], "missing", "Field required");
        let response = ApiError::from(ProductError::Validation(violation)).into_response();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["loc"], json!(["owner"]));
        assert_eq!(body["error"]["type"], "missing");
    }

    #[tokio::test]
    async fn test_storage_errors_do_not_leak() {
        let err = ProductError::Storage(sqlx::Error::Protocol("secret detail".to_string()));
        let (status, body) = body_of(ApiError::from(err).into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak() {
        let err = ProductError::Internal("product id space exhausted".to_string());
        let (status, body) = body_of(ApiError::from(err).into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
