//! 评分与共识引擎
//!
//! 一次评分请求在同一把提交级锁内依次经过：
//! 截止时间解析 → 迟交罚分 → 评阅身份解析 → 台账追加 → 共识判定 → 进度累计 → 原子写入。
//! 任一步失败都不会写入任何状态。

pub mod consensus;
pub mod deadline;
pub mod ledger;
pub mod locks;
pub mod policy;
pub mod progress;
pub mod roles;

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{GradingError, Result};
use crate::models::grading::entities::{ConsensusState, GradingEntry};
use crate::models::grading::requests::GradingRequest;
use crate::models::grading::responses::GradingOutcome;
use crate::models::projects::entities::ProjectPatch;
use crate::models::submissions::entities::{GradingCommit, MAX_ATTEMPTS};
use crate::storage::Storage;
use crate::utils::validate::{validate_identifier, validate_required_text};

pub use consensus::ConsensusDecision;
pub use locks::{AttemptKey, AttemptLocks};
pub use policy::GradingPolicy;

pub struct GradingEngine {
    storage: Arc<dyn Storage>,
    policy: GradingPolicy,
    locks: AttemptLocks,
}

impl GradingEngine {
    pub fn new(storage: Arc<dyn Storage>, policy: GradingPolicy) -> Self {
        Self {
            storage,
            policy,
            locks: AttemptLocks::new(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// 执行一次评分事务
    pub async fn grade(&self, request: GradingRequest) -> Result<GradingOutcome> {
        validate_request(&request)?;

        let key = AttemptKey {
            project_id: request.project_id.clone(),
            student_id: request.student_id.clone(),
            attempt_index: request.attempt_index,
        };
        let _guard = self.locks.acquire(key.clone()).await;

        let project = self
            .storage
            .get_project(&request.project_id)
            .await?
            .ok_or_else(|| {
                GradingError::not_found(format!("project '{}' not found", request.project_id))
            })?;
        let record = self
            .storage
            .get_submission_record(&request.project_id, &request.student_id)
            .await?
            .ok_or_else(|| {
                GradingError::not_found(format!(
                    "no submission record for student '{}' on project '{}'",
                    request.student_id, request.project_id
                ))
            })?;
        let mut attempt = record
            .attempt(request.attempt_index)
            .cloned()
            .ok_or_else(|| {
                GradingError::not_found(format!("attempt {} not found", request.attempt_index))
            })?;

        let deadline = deadline::deadline_for(&project, request.attempt_index);
        let late_days = deadline::late_days_between(deadline, attempt.created_at);
        let marks = self.policy.apply_late_penalty(request.raw_marks, late_days);

        let role = roles::role_of(&project, &request.marker_id).inspect_err(|e| {
            warn!("Grading rejected for {}: {}", key, e);
        })?;

        let expected_entries = attempt.entries.len();
        let entry = GradingEntry {
            id: Uuid::new_v4().to_string(),
            marker_id: request.marker_id.clone(),
            role,
            marks,
            raw_marks: request.raw_marks,
            late_days,
            grade: policy::grade_from_marks(marks),
            summative_assessment: request.summative_assessment,
            justification: request.justification,
            formative_feedback: request.formative_feedback,
            graded_at: Utc::now(),
        };
        ledger::append(&mut attempt, entry).inspect_err(|e| {
            warn!("Grading rejected for {}: {}", key, e);
        })?;

        let decision =
            consensus::resolve(&attempt, role, project.has_second_supervisor(), &self.policy);
        debug!("Consensus decision for {}: {:?}", key, decision);
        decision.apply_to(&mut attempt);

        let progress_delta = progress::award_for(&self.policy, role, &attempt);
        if progress_delta > 0 {
            attempt.progress_awarded = true;
        }

        let (updated_attempt, project) = self
            .storage
            .commit_grading(GradingCommit {
                project_id: request.project_id.clone(),
                student_id: request.student_id.clone(),
                attempt,
                expected_entries,
                project_patch: ProjectPatch {
                    progress_delta,
                    progress_cap: self.policy.progress_cap,
                },
            })
            .await?;

        match updated_attempt.consensus {
            ConsensusState::AwaitingArbitration => info!(
                "Attempt {} escalated to third marker (project flag set)",
                key
            ),
            state if state.is_final() => info!(
                "Attempt {} finalized ({:?}): {:?} / {:?}",
                key, state, updated_attempt.final_marks, updated_attempt.final_grade
            ),
            _ => debug!("Attempt {} awaiting second supervisor", key),
        }
        if progress_delta > 0 {
            info!(
                "Project {} progress +{} -> {}",
                project.id, progress_delta, project.progress
            );
        }

        Ok(GradingOutcome {
            final_marks: updated_attempt.final_marks,
            final_grade: updated_attempt.final_grade,
            late_days,
            progress_awarded: progress_delta,
            project_progress: project.progress,
            third_marker_required: project.third_marker_required,
            updated_attempt,
        })
    }
}

/// 在读取任何状态之前校验请求
fn validate_request(request: &GradingRequest) -> Result<()> {
    validate_identifier("projectId", &request.project_id).map_err(GradingError::validation)?;
    validate_identifier("studentId", &request.student_id).map_err(GradingError::validation)?;
    validate_identifier("markerId", &request.marker_id).map_err(GradingError::validation)?;

    if usize::from(request.attempt_index) >= MAX_ATTEMPTS {
        return Err(GradingError::validation(format!(
            "attemptIndex must be 0, 1 or 2, got {}",
            request.attempt_index
        )));
    }
    if !request.raw_marks.is_finite() || !(0.0..=100.0).contains(&request.raw_marks) {
        return Err(GradingError::validation(
            "rawMarks must be a number between 0 and 100",
        ));
    }

    validate_required_text("justification", &request.justification)
        .map_err(GradingError::validation)?;
    if request.summative_assessment.is_empty() {
        return Err(GradingError::validation(
            "summativeAssessment must contain at least one category",
        ));
    }
    for item in &request.summative_assessment {
        validate_required_text("summativeAssessment.category", &item.category)
            .map_err(GradingError::validation)?;
        validate_required_text("summativeAssessment.grade", &item.grade)
            .map_err(GradingError::validation)?;
    }
    Ok(())
}
