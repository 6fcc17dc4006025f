use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::projects::requests::UpsertProjectRequest;
use crate::services::ProjectService;

// 懒加载的全局 ProjectService 实例
static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

// 登记或更新项目
pub async fn upsert_project(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpsertProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .upsert_project(&req, path.into_inner(), body.into_inner())
        .await
}

// 获取项目详情
pub async fn get_project(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.get_project(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_projects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/projects/{project_id}")
            .route(web::get().to(get_project))
            .route(web::put().to(upsert_project)),
    );
}
