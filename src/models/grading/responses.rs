use serde::Serialize;
use ts_rs::TS;

use crate::models::grading::entities::GradeLetter;
use crate::models::submissions::entities::SubmissionAttempt;

/// 评分结果
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingOutcome {
    pub final_marks: Option<f64>,
    pub final_grade: Option<GradeLetter>,
    pub late_days: u32,
    pub progress_awarded: u32,
    pub project_progress: u32,
    pub third_marker_required: bool,
    pub updated_attempt: SubmissionAttempt,
}
