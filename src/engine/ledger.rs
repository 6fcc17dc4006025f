//! 评分台账
//!
//! 每次提交只追加、不修改。同一评阅人最多一条，同一身份最多一条：
//! 两位导师加一位第三评阅人，最多三条。

use crate::errors::{GradingError, Result};
use crate::models::grading::entities::{GradingEntry, MarkerRole};
use crate::models::submissions::entities::SubmissionAttempt;

/// 每次提交允许的评分条数上限
pub const MAX_LEDGER_ENTRIES: usize = 3;

/// 追加一条评分记录，保持插入顺序
pub fn append(attempt: &mut SubmissionAttempt, entry: GradingEntry) -> Result<()> {
    if attempt.entry_by_marker(&entry.marker_id).is_some() {
        return Err(GradingError::conflict(format!(
            "marker '{}' has already graded attempt {}",
            entry.marker_id, attempt.attempt_index
        )));
    }

    if let Some(existing) = attempt.entry_by_role(entry.role) {
        return Err(GradingError::conflict(format!(
            "attempt {} already has a {} entry from '{}'",
            attempt.attempt_index, entry.role, existing.marker_id
        )));
    }

    if attempt.entries.len() >= MAX_LEDGER_ENTRIES {
        return Err(GradingError::conflict(format!(
            "attempt {} already has the maximum of {MAX_LEDGER_ENTRIES} grading entries",
            attempt.attempt_index
        )));
    }

    attempt.entries.push(entry);
    Ok(())
}

/// 导师评分（不含第三评阅人），按插入顺序
pub fn supervisor_entries(attempt: &SubmissionAttempt) -> Vec<&GradingEntry> {
    attempt
        .entries
        .iter()
        .filter(|e| e.role.is_supervisor())
        .collect()
}

pub fn third_marker_entry(attempt: &SubmissionAttempt) -> Option<&GradingEntry> {
    attempt.entry_by_role(MarkerRole::ThirdMarker)
}
