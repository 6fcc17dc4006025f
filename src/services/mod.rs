pub mod grading;
pub mod projects;
pub mod submissions;

pub use grading::GradingService;
pub use projects::ProjectService;
pub use submissions::SubmissionService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{error, warn};

use crate::engine::GradingEngine;
use crate::errors::GradingError;
use crate::models::{ApiResponse, ErrorCode};

/// 从 app data 中取出评分引擎
pub(crate) fn get_engine(request: &HttpRequest) -> Option<Arc<GradingEngine>> {
    request
        .app_data::<web::Data<GradingEngine>>()
        .map(|data| data.clone().into_inner())
}

pub(crate) fn engine_missing_response() -> HttpResponse {
    error!("GradingEngine not found in app data");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "评分引擎未初始化",
    ))
}

/// 将引擎错误转换为统一格式的 HTTP 响应
pub(crate) fn error_response(err: &GradingError) -> HttpResponse {
    if err.is_client_error() {
        warn!("Request rejected: {}", err);
    } else {
        error!("{}", err);
    }

    let body = |code: ErrorCode| ApiResponse::error_empty(code, err.message());
    match err {
        GradingError::Validation(_) => {
            HttpResponse::BadRequest().json(body(ErrorCode::ValidationFailed))
        }
        GradingError::NotFound(_) => HttpResponse::NotFound().json(body(ErrorCode::NotFound)),
        GradingError::Authorization(_) => {
            HttpResponse::Forbidden().json(body(ErrorCode::MarkerNotAssigned))
        }
        GradingError::Conflict(_) => HttpResponse::Conflict().json(body(ErrorCode::Conflict)),
        _ => HttpResponse::InternalServerError().json(body(ErrorCode::InternalServerError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (GradingError::validation("x"), StatusCode::BAD_REQUEST),
            (GradingError::not_found("x"), StatusCode::NOT_FOUND),
            (GradingError::authorization("x"), StatusCode::FORBIDDEN),
            (GradingError::conflict("x"), StatusCode::CONFLICT),
            (
                GradingError::storage_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status, "{err}");
        }
    }
}
