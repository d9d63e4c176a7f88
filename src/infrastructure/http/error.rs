//! HTTP Error Handling
//!
//! 所有错误以纯文本返回，状态码反映错误类别；上游细节只写日志

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::application::ApplicationError;

/// 通用服务端错误文案
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 500，`message` 返回给调用方，`detail` 只记录日志
    Internal { message: String, detail: String },
    /// 404
    NotFound,
    /// 请求体超限：不返回结构化错误，关闭连接
    PayloadTooLarge,
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = 400, error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal { message, detail } => {
                tracing::error!(status = 500, error = %detail, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                [(header::CONNECTION, "close")],
            )
                .into_response(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let message = e.to_string();
        match e {
            ApplicationError::InvalidInput(_) => ApiError::BadRequest(message),
            ApplicationError::NotConfigured | ApplicationError::UnusableAudio => {
                ApiError::internal(message.clone(), message)
            }
            ApplicationError::MalformedRequest(detail)
            | ApplicationError::ExternalServiceError(detail) => {
                ApiError::internal(SERVER_ERROR_MESSAGE, detail)
            }
        }
    }
}
