//! HTTP error mapping for the parse service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const MSG_NOT_JSON: &str = "请求体必须是JSON格式";
pub const MSG_MISSING_QUERY: &str = "未提供查询内容，请传入 'query'";
pub const MSG_INTERNAL: &str = "服务器内部错误";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    /// Detail is for logs only; clients get a fixed message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Internal(_) => MSG_INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
