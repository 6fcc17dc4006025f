use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一格式的错误
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    debug!("JSON payload rejected: {}", err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid JSON payload: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// 路径参数解析失败时返回统一格式的错误
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    debug!("Path parameter rejected: {}", err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
