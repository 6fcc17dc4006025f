use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{engine_missing_response, error_response, get_engine};

/// 获取提交记录
/// GET /projects/{project_id}/submissions/{student_id}
pub async fn get_submission_record(
    _service: &SubmissionService,
    request: &HttpRequest,
    project_id: String,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let Some(engine) = get_engine(request) else {
        return Ok(engine_missing_response());
    };

    match engine
        .storage()
        .get_submission_record(&project_id, &student_id)
        .await
    {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(record, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交记录不存在",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
