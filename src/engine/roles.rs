//! 评阅人身份解析

use crate::errors::{GradingError, Result};
use crate::models::grading::entities::MarkerRole;
use crate::models::projects::entities::Project;

/// 解析 `marker_id` 在项目中的评阅身份
///
/// 未被指派到该项目的评阅人返回授权错误，评分不得继续。
pub fn role_of(project: &Project, marker_id: &str) -> Result<MarkerRole> {
    let markers = &project.markers;
    let assignments = [
        (Some(markers.supervisor_first.as_str()), MarkerRole::SupervisorFirst),
        (markers.supervisor_second.as_deref(), MarkerRole::SupervisorSecond),
        (markers.third_marker.as_deref(), MarkerRole::ThirdMarker),
    ];

    assignments
        .into_iter()
        .find_map(|(assigned, role)| (assigned == Some(marker_id)).then_some(role))
        .ok_or_else(|| {
            GradingError::authorization(format!(
                "marker '{marker_id}' is not assigned to this project as a marker"
            ))
        })
}
