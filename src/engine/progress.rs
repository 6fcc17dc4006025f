//! 项目进度累计
//!
//! 只在第一导师评分时触发，与共识结果无关，之后也不会回退。

use crate::engine::policy::GradingPolicy;
use crate::models::grading::entities::MarkerRole;
use crate::models::submissions::entities::SubmissionAttempt;

/// 本次评分应增加的进度，无需增加时返回 0
///
/// 每次提交最多计入一次，更换第一导师后重新评分不会重复累计。
pub fn award_for(policy: &GradingPolicy, role: MarkerRole, attempt: &SubmissionAttempt) -> u32 {
    if role != MarkerRole::SupervisorFirst || attempt.progress_awarded {
        return 0;
    }
    policy
        .progress_awards
        .get(usize::from(attempt.attempt_index))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(index: u8) -> SubmissionAttempt {
        SubmissionAttempt::new(index, format!("artifact-{index}"), Utc::now())
    }

    #[test]
    fn test_awards_by_attempt_index() {
        let policy = GradingPolicy::default();
        let awards: Vec<u32> = (0..3)
            .map(|i| award_for(&policy, MarkerRole::SupervisorFirst, &attempt(i)))
            .collect();
        assert_eq!(awards, vec![25, 45, 30]);
        assert_eq!(awards.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_only_first_supervisor_accrues() {
        let policy = GradingPolicy::default();
        assert_eq!(
            award_for(&policy, MarkerRole::SupervisorSecond, &attempt(1)),
            0
        );
        assert_eq!(award_for(&policy, MarkerRole::ThirdMarker, &attempt(1)), 0);
    }

    #[test]
    fn test_already_awarded_attempt_is_skipped() {
        let policy = GradingPolicy::default();
        let mut a = attempt(1);
        a.progress_awarded = true;
        assert_eq!(award_for(&policy, MarkerRole::SupervisorFirst, &a), 0);
    }
}
