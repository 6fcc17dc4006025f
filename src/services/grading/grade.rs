use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::GradingService;
use crate::models::ApiResponse;
use crate::models::grading::entities::ConsensusState;
use crate::models::grading::requests::GradingRequest;
use crate::services::{engine_missing_response, error_response, get_engine};

/// 评分
/// POST /projects/{project_id}/submissions/{student_id}/attempts/{attempt_index}/grade
pub async fn grade_attempt(
    _service: &GradingService,
    request: &HttpRequest,
    req: GradingRequest,
) -> ActixResult<HttpResponse> {
    let Some(engine) = get_engine(request) else {
        return Ok(engine_missing_response());
    };

    debug!(
        "Grading request: project={} student={} attempt={} marker={}",
        req.project_id, req.student_id, req.attempt_index, req.marker_id
    );

    match engine.grade(req).await {
        Ok(outcome) => {
            let message = if outcome.final_marks.is_some() {
                "评分完成"
            } else if outcome.updated_attempt.consensus == ConsensusState::AwaitingArbitration {
                "评分分歧过大，等待第三评阅人"
            } else {
                "评分已记录，等待另一位导师"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
