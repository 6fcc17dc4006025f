use serde::Deserialize;
use ts_rs::TS;

use crate::models::grading::entities::CategoryAssessment;

/// 评分请求体（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradeAttemptBody {
    pub marker_id: String,
    pub raw_marks: f64,
    pub justification: String,
    #[serde(default)]
    pub summative_assessment: Vec<CategoryAssessment>,
    pub formative_feedback: Option<String>,
}

// 评分引擎的输入
#[derive(Debug, Clone)]
pub struct GradingRequest {
    pub project_id: String,
    pub student_id: String,
    pub attempt_index: u8,
    pub marker_id: String,
    pub raw_marks: f64,
    pub justification: String,
    pub summative_assessment: Vec<CategoryAssessment>,
    pub formative_feedback: Option<String>,
}

impl GradingRequest {
    pub fn from_body(
        project_id: String,
        student_id: String,
        attempt_index: u8,
        body: GradeAttemptBody,
    ) -> Self {
        Self {
            project_id,
            student_id,
            attempt_index,
            marker_id: body.marker_id,
            raw_marks: body.raw_marks,
            justification: body.justification,
            summative_assessment: body.summative_assessment,
            formative_feedback: body.formative_feedback,
        }
    }
}
