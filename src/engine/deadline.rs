//! 截止时间解析与迟交天数计算

use chrono::{DateTime, Duration, Utc};

use crate::models::projects::entities::Project;

/// 第 `attempt_index` 次提交对应的截止时间，索引超出范围时返回 `None`
pub fn deadline_for(project: &Project, attempt_index: u8) -> Option<DateTime<Utc>> {
    match attempt_index {
        0 => project.deadlines.first,
        1 => project.deadlines.second,
        2 => project.deadlines.third,
        _ => None,
    }
}

/// 迟交天数，不足一天按一天计
pub fn late_days_between(deadline: Option<DateTime<Utc>>, submitted_at: DateTime<Utc>) -> u32 {
    let Some(deadline) = deadline else {
        return 0;
    };
    if submitted_at <= deadline {
        return 0;
    }

    let overdue = submitted_at - deadline;
    let day_ms = Duration::days(1).num_milliseconds();
    let overdue_ms = overdue.num_milliseconds().max(1);
    let days = (overdue_ms + day_ms - 1) / day_ms;
    u32::try_from(days).unwrap_or(u32::MAX)
}
