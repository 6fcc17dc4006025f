pub mod grade;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::grading::requests::GradingRequest;

pub struct GradingService;

impl GradingService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 对一次提交评分
    pub async fn grade_attempt(
        &self,
        request: &HttpRequest,
        req: GradingRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_attempt(self, request, req).await
    }
}
