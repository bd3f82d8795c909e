//! 请求提取器，失败时返回 [`ApiError`]

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;

use super::error::ApiError;
use crate::app::product::{schema::Violation, ProductError};

/// 尚未经过 schema 校验的 JSON 请求体
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ProductError::Validation(Violation::body(rejection.body_text())))?;
        Ok(JsonBody(value))
    }
}

/// 路径中的 `{id}` 段。非整数 id 不可能对应任何产品，按未找到处理
pub struct ProductId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| ProductError::NotFound)?;
        Ok(ProductId(id))
    }
}
