use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::GradingError;
use crate::models::ApiResponse;
use crate::models::submissions::requests::SaveAttemptRequest;
use crate::services::{engine_missing_response, error_response, get_engine};
use crate::utils::validate::{validate_identifier, validate_required_text};

/// 保存提交
/// POST /projects/{project_id}/submissions/{student_id}/attempts
pub async fn save_attempt(
    _service: &SubmissionService,
    request: &HttpRequest,
    project_id: String,
    student_id: String,
    req: SaveAttemptRequest,
) -> ActixResult<HttpResponse> {
    let Some(engine) = get_engine(request) else {
        return Ok(engine_missing_response());
    };

    let validation = validate_identifier("projectId", &project_id)
        .and_then(|_| validate_identifier("studentId", &student_id))
        .and_then(|_| validate_required_text("artifactRef", &req.artifact_ref))
        .map_err(GradingError::validation);
    if let Err(e) = validation {
        return Ok(error_response(&e));
    }

    let attempt_index = req.attempt_index;
    match engine
        .storage()
        .save_attempt(&project_id, &student_id, req)
        .await
    {
        Ok(record) => {
            info!(
                "Attempt {} saved for student {} on project {}",
                attempt_index, student_id, project_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(record, "提交已保存")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
