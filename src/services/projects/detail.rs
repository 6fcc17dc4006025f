use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{engine_missing_response, error_response, get_engine};

/// 获取项目详情
/// GET /projects/{project_id}
pub async fn get_project(
    _service: &ProjectService,
    request: &HttpRequest,
    project_id: String,
) -> ActixResult<HttpResponse> {
    let Some(engine) = get_engine(request) else {
        return Ok(engine_missing_response());
    };

    match engine.storage().get_project(&project_id).await {
        Ok(Some(project)) => Ok(HttpResponse::Ok().json(ApiResponse::success(project, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "项目不存在",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
