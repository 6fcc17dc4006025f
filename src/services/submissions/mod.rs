pub mod detail;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::submissions::requests::SaveAttemptRequest;

pub struct SubmissionService;

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 保存一次提交
    pub async fn save_attempt(
        &self,
        request: &HttpRequest,
        project_id: String,
        student_id: String,
        req: SaveAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_attempt(self, request, project_id, student_id, req).await
    }

    /// 获取提交记录
    pub async fn get_submission_record(
        &self,
        request: &HttpRequest,
        project_id: String,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission_record(self, request, project_id, student_id).await
    }
}
