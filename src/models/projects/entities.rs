use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 三次提交各自的截止时间
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct ProjectDeadlines {
    pub first: Option<DateTime<Utc>>,
    pub second: Option<DateTime<Utc>>,
    pub third: Option<DateTime<Utc>>,
}

/// 项目指派的评阅人
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct ProjectMarkers {
    pub supervisor_first: String,
    pub supervisor_second: Option<String>,
    pub third_marker: Option<String>,
}

/// 项目（评分引擎关心的部分）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/project.ts")]
pub struct Project {
    pub id: String,
    pub deadlines: ProjectDeadlines,
    pub markers: ProjectMarkers,
    pub third_marker_required: bool,
    pub progress: u32, // 完成百分比
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn has_second_supervisor(&self) -> bool {
        self.markers.supervisor_second.is_some()
    }
}

/// 评分提交时对项目进度的增量修改
///
/// 仲裁标记不在此列：它取决于项目下所有提交的状态，由存储层在写入时重新计算。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectPatch {
    pub progress_delta: u32,
    pub progress_cap: u32,
}

impl ProjectPatch {
    pub fn is_noop(&self) -> bool {
        self.progress_delta == 0
    }

    /// 将增量应用到项目上
    pub fn apply(&self, project: &mut Project) {
        if self.progress_delta > 0 {
            project.progress = project
                .progress
                .saturating_add(self.progress_delta)
                .min(self.progress_cap.max(project.progress));
        }
    }
}
