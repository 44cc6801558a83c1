//! Response helpers shared by the handlers

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use super::types::ErrorResponse;
use crate::errors::UrlMiniError;

/// 构建错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.into(),
    })
}

/// Map a service error to its status and client-safe message
pub fn error_from_urlmini(err: &UrlMiniError) -> HttpResponse {
    error_response(err.http_status(), err.client_message())
}
