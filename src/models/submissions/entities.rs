use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::grading::entities::{ConsensusState, GradeLetter, GradingEntry, MarkerRole};
use crate::models::projects::entities::ProjectPatch;

/// 每个学生在一个项目上最多的提交次数
pub const MAX_ATTEMPTS: usize = 3;

/// 一次提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionAttempt {
    pub attempt_index: u8,
    pub artifact_ref: String,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<GradingEntry>,
    pub final_grade: Option<GradeLetter>,
    pub final_marks: Option<f64>,
    pub consensus: ConsensusState,
    pub progress_awarded: bool, // 第一导师评分时是否已计入项目进度
}

impl SubmissionAttempt {
    pub fn new(attempt_index: u8, artifact_ref: String, created_at: DateTime<Utc>) -> Self {
        Self {
            attempt_index,
            artifact_ref,
            created_at,
            entries: Vec::new(),
            final_grade: None,
            final_marks: None,
            consensus: ConsensusState::Pending,
            progress_awarded: false,
        }
    }

    pub fn entry_by_marker(&self, marker_id: &str) -> Option<&GradingEntry> {
        self.entries.iter().find(|e| e.marker_id == marker_id)
    }

    pub fn entry_by_role(&self, role: MarkerRole) -> Option<&GradingEntry> {
        self.entries.iter().find(|e| e.role == role)
    }

    pub fn is_graded(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// 学生在项目上的提交记录，首次提交时创建
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionRecord {
    pub project_id: String,
    pub student_id: String,
    pub attempts: Vec<SubmissionAttempt>,
    pub final_grade: Option<GradeLetter>,
    pub final_marks: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn attempt(&self, attempt_index: u8) -> Option<&SubmissionAttempt> {
        self.attempts
            .iter()
            .find(|a| a.attempt_index == attempt_index)
    }

    pub fn attempt_mut(&mut self, attempt_index: u8) -> Option<&mut SubmissionAttempt> {
        self.attempts
            .iter_mut()
            .find(|a| a.attempt_index == attempt_index)
    }
}

/// 一次评分事务需要原子写入的内容
#[derive(Debug, Clone)]
pub struct GradingCommit {
    pub project_id: String,
    pub student_id: String,
    pub attempt: SubmissionAttempt,
    /// 作出决策时读到的评分条数，存储层据此检测并发修改
    pub expected_entries: usize,
    pub project_patch: ProjectPatch,
}
