use serde::Deserialize;
use ts_rs::TS;

use crate::models::projects::entities::{ProjectDeadlines, ProjectMarkers};

/// 登记/更新项目请求
///
/// `progress` 与 `thirdMarkerRequired` 由评分引擎维护，更新时保留原值。
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct UpsertProjectRequest {
    #[serde(default)]
    pub deadlines: ProjectDeadlines,
    pub markers: ProjectMarkers,
}
