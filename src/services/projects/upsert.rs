use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProjectService;
use crate::errors::GradingError;
use crate::models::ApiResponse;
use crate::models::projects::entities::ProjectMarkers;
use crate::models::projects::requests::UpsertProjectRequest;
use crate::services::{engine_missing_response, error_response, get_engine};
use crate::utils::validate_identifier;

/// 校验评阅人指派：第一导师必填，三位评阅人互不相同
fn validate_markers(markers: &ProjectMarkers) -> Result<(), GradingError> {
    validate_identifier("markers.supervisorFirst", &markers.supervisor_first)
        .map_err(GradingError::validation)?;

    let optional = [
        ("markers.supervisorSecond", markers.supervisor_second.as_deref()),
        ("markers.thirdMarker", markers.third_marker.as_deref()),
    ];
    let mut assigned = vec![markers.supervisor_first.as_str()];
    for (field, value) in optional {
        let Some(value) = value else { continue };
        validate_identifier(field, value).map_err(GradingError::validation)?;
        if assigned.contains(&value) {
            return Err(GradingError::validation(format!(
                "{field} must differ from the other markers"
            )));
        }
        assigned.push(value);
    }
    Ok(())
}

/// 登记或更新项目
/// PUT /projects/{project_id}
pub async fn upsert_project(
    _service: &ProjectService,
    request: &HttpRequest,
    project_id: String,
    req: UpsertProjectRequest,
) -> ActixResult<HttpResponse> {
    let Some(engine) = get_engine(request) else {
        return Ok(engine_missing_response());
    };

    let validation = validate_identifier("projectId", &project_id)
        .map_err(GradingError::validation)
        .and_then(|_| validate_markers(&req.markers));
    if let Err(e) = validation {
        return Ok(error_response(&e));
    }

    match engine.storage().upsert_project(&project_id, req).await {
        Ok(project) => {
            info!("Project {} registered", project.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(project, "项目已保存")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
