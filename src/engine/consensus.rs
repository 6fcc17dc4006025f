//! 共识判定
//!
//! 每次台账追加成功后立即执行，优先级：
//! 1. 第三评阅人裁定：无条件覆盖
//! 2. 未配置第二导师：第一导师评分即为最终结果
//! 3. 已配置第二导师但导师评分不足两条：保持等待
//! 4. 两位导师均已评分：分差超过阈值则升级仲裁，否则取四舍五入平均

use tracing::debug;

use crate::engine::ledger;
use crate::engine::policy::{GradingPolicy, grade_from_marks, rounded_mean};
use crate::models::grading::entities::{ConsensusState, GradeLetter, MarkerRole};
use crate::models::submissions::entities::SubmissionAttempt;

/// 一次追加之后的判定结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsensusDecision {
    Finalize {
        marks: f64,
        grade: GradeLetter,
        state: ConsensusState,
    },
    Pending,
    Escalate,
    /// 第三评阅人已裁定，后续导师评分不再改变结果
    Retain,
}

/// 根据当前台账决定提交的最终结果
pub fn resolve(
    attempt: &SubmissionAttempt,
    appended_role: MarkerRole,
    has_second_supervisor: bool,
    policy: &GradingPolicy,
) -> ConsensusDecision {
    if appended_role == MarkerRole::ThirdMarker
        && let Some(entry) = ledger::third_marker_entry(attempt)
    {
        return ConsensusDecision::Finalize {
            marks: entry.marks,
            grade: entry.grade,
            state: ConsensusState::FinalizedByThirdMarker,
        };
    }

    if attempt.consensus == ConsensusState::FinalizedByThirdMarker
        || ledger::third_marker_entry(attempt).is_some()
    {
        return ConsensusDecision::Retain;
    }

    let supervisors = ledger::supervisor_entries(attempt);

    if !has_second_supervisor {
        return match supervisors
            .iter()
            .find(|e| e.role == MarkerRole::SupervisorFirst)
        {
            Some(entry) => ConsensusDecision::Finalize {
                marks: entry.marks,
                grade: grade_from_marks(entry.marks),
                state: ConsensusState::FinalizedBySingle,
            },
            None => ConsensusDecision::Pending,
        };
    }

    let [first, second] = supervisors.as_slice() else {
        return ConsensusDecision::Pending;
    };

    if policy.requires_arbitration(first.marks, second.marks) {
        debug!(
            "Supervisor marks {} and {} differ by more than {}",
            first.marks, second.marks, policy.arbitration_threshold
        );
        return ConsensusDecision::Escalate;
    }

    let marks = rounded_mean(first.marks, second.marks);
    ConsensusDecision::Finalize {
        marks,
        grade: grade_from_marks(marks),
        state: ConsensusState::FinalizedByAverage,
    }
}

impl ConsensusDecision {
    /// 写入提交的最终结果
    ///
    /// 项目的仲裁标记由存储层在写入时按全部提交的状态重新计算。
    pub fn apply_to(&self, attempt: &mut SubmissionAttempt) {
        match *self {
            ConsensusDecision::Finalize {
                marks,
                grade,
                state,
            } => {
                attempt.final_marks = Some(marks);
                attempt.final_grade = Some(grade);
                attempt.consensus = state;
            }
            ConsensusDecision::Pending => {
                attempt.consensus = ConsensusState::Pending;
            }
            ConsensusDecision::Escalate => {
                attempt.final_marks = None;
                attempt.final_grade = None;
                attempt.consensus = ConsensusState::AwaitingArbitration;
            }
            ConsensusDecision::Retain => {}
        }
    }
}
