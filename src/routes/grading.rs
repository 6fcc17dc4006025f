use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grading::requests::{GradeAttemptBody, GradingRequest};
use crate::services::GradingService;

// 懒加载的全局 GradingService 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

// 评分
pub async fn grade_attempt(
    req: HttpRequest,
    path: web::Path<(String, String, u8)>, // (project_id, student_id, attempt_index)
    body: web::Json<GradeAttemptBody>,
) -> ActixResult<HttpResponse> {
    let (project_id, student_id, attempt_index) = path.into_inner();
    let request = GradingRequest::from_body(project_id, student_id, attempt_index, body.into_inner());
    GRADING_SERVICE.grade_attempt(&req, request).await
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(
            "/api/v1/projects/{project_id}/submissions/{student_id}/attempts/{attempt_index}/grade",
        )
        .route(web::post().to(grade_attempt)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GradingEngine, GradingPolicy};
    use crate::routes;
    use crate::storage::Storage;
    use crate::storage::memory::MemoryStorage;
    use crate::utils::{json_error_handler, path_error_handler};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn engine_data() -> web::Data<GradingEngine> {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        web::Data::new(GradingEngine::new(storage, GradingPolicy::default()))
    }

    fn grade_body(marker: &str, marks: f64) -> Value {
        json!({
            "markerId": marker,
            "rawMarks": marks,
            "justification": "Well argued.",
            "summativeAssessment": [{"category": "method", "grade": "A"}],
        })
    }

    #[actix_web::test]
    async fn test_grading_flow_over_http() {
        let app = test::init_service(
            App::new()
                .app_data(engine_data())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .configure(routes::configure_projects_routes)
                .configure(routes::configure_submissions_routes)
                .configure(routes::configure_grading_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/v1/projects/p1")
            .set_json(json!({
                "deadlines": {"first": "2026-05-01T12:00:00Z"},
                "markers": {"supervisorFirst": "alice", "supervisorSecond": "bob"},
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/projects/p1/submissions/s1/attempts")
            .set_json(json!({
                "attemptIndex": 0,
                "artifactRef": "uploads/s1-0.pdf",
                "createdAt": "2026-05-01T10:00:00Z",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let grade_uri = "/api/v1/projects/p1/submissions/s1/attempts/0/grade";
        let req = test::TestRequest::post()
            .uri(grade_uri)
            .set_json(grade_body("alice", 80.0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["finalMarks"], Value::Null);
        assert_eq!(body["data"]["progressAwarded"], 25);

        let req = test::TestRequest::post()
            .uri(grade_uri)
            .set_json(grade_body("bob", 70.0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["finalMarks"], 75.0);
        assert_eq!(body["data"]["finalGrade"], "B");
        assert_eq!(body["data"]["lateDays"], 0);

        let req = test::TestRequest::post()
            .uri(grade_uri)
            .set_json(grade_body("bob", 70.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri(grade_uri)
            .set_json(grade_body("mallory", 70.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/projects/p1/submissions/s1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["attempts"][0]["consensus"], "finalized_by_average");
        assert_eq!(
            body["data"]["attempts"][0]["entries"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }

    #[actix_web::test]
    async fn test_bad_requests_use_api_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(engine_data())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .configure(routes::configure_grading_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/projects/p1/submissions/s1/attempts/first/grade")
            .set_json(grade_body("alice", 80.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/projects/p1/submissions/s1/attempts/0/grade")
            .set_json(grade_body("alice", 120.0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 1001);

        let req = test::TestRequest::post()
            .uri("/api/v1/projects/p1/submissions/s1/attempts/0/grade")
            .set_json(json!({"rawMarks": 80}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_project_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(engine_data())
                .configure(routes::configure_projects_routes)
                .configure(routes::configure_grading_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/projects/ghost")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/projects/ghost/submissions/s1/attempts/0/grade")
            .set_json(grade_body("alice", 80.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
