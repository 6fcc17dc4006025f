use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::SaveAttemptRequest;
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 保存提交
pub async fn save_attempt(
    req: HttpRequest,
    path: web::Path<(String, String)>, // (project_id, student_id)
    body: web::Json<SaveAttemptRequest>,
) -> ActixResult<HttpResponse> {
    let (project_id, student_id) = path.into_inner();
    SUBMISSION_SERVICE
        .save_attempt(&req, project_id, student_id, body.into_inner())
        .await
}

// 获取提交记录
pub async fn get_submission_record(
    req: HttpRequest,
    path: web::Path<(String, String)>, // (project_id, student_id)
) -> ActixResult<HttpResponse> {
    let (project_id, student_id) = path.into_inner();
    SUBMISSION_SERVICE
        .get_submission_record(&req, project_id, student_id)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/projects/{project_id}/submissions/{student_id}")
            .route(web::get().to(get_submission_record)),
    )
    .service(
        web::resource("/api/v1/projects/{project_id}/submissions/{student_id}/attempts")
            .route(web::post().to(save_attempt)),
    );
}
