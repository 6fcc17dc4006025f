pub mod detail;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::projects::requests::UpsertProjectRequest;

pub struct ProjectService;

impl ProjectService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 登记或更新项目
    pub async fn upsert_project(
        &self,
        request: &HttpRequest,
        project_id: String,
        req: UpsertProjectRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_project(self, request, project_id, req).await
    }

    /// 获取项目详情
    pub async fn get_project(
        &self,
        request: &HttpRequest,
        project_id: String,
    ) -> ActixResult<HttpResponse> {
        detail::get_project(self, request, project_id).await
    }
}
