//! 评分策略：分数到等级的映射与迟交罚分
//!
//! 纯函数，不依赖任何状态。

use crate::config::GradingConfig;
use crate::errors::GradingError;
use crate::models::grading::entities::GradeLetter;
use crate::models::submissions::entities::MAX_ATTEMPTS;

/// 评分策略常量
#[derive(Debug, Clone, PartialEq)]
pub struct GradingPolicy {
    /// 两位导师分差超过该值时升级到第三评阅人
    pub arbitration_threshold: f64,
    /// 每迟交一天扣除的分数
    pub penalty_per_day: f64,
    /// 罚分后的最低分
    pub penalty_floor: f64,
    /// 第一导师评分第 0/1/2 次提交时增加的进度
    pub progress_awards: [u32; 3],
    /// 项目进度上限
    pub progress_cap: u32,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            arbitration_threshold: 10.0,
            penalty_per_day: 5.0,
            penalty_floor: 50.0,
            progress_awards: [25, 45, 30],
            progress_cap: 100,
        }
    }
}

impl TryFrom<&GradingConfig> for GradingPolicy {
    type Error = GradingError;

    fn try_from(config: &GradingConfig) -> Result<Self, Self::Error> {
        non_negative("grading.arbitration_threshold", config.arbitration_threshold)?;
        non_negative("grading.penalty_per_day", config.penalty_per_day)?;
        non_negative("grading.penalty_floor", config.penalty_floor)?;
        if config.penalty_floor > 100.0 {
            return Err(GradingError::configuration(format!(
                "grading.penalty_floor must not exceed 100, got {}",
                config.penalty_floor
            )));
        }

        let progress_awards: [u32; MAX_ATTEMPTS] =
            config.progress_awards.as_slice().try_into().map_err(|_| {
                GradingError::configuration(format!(
                    "grading.progress_awards must list exactly {MAX_ATTEMPTS} values, got {}",
                    config.progress_awards.len()
                ))
            })?;

        Ok(Self {
            arbitration_threshold: config.arbitration_threshold,
            penalty_per_day: config.penalty_per_day,
            penalty_floor: config.penalty_floor,
            progress_awards,
            progress_cap: config.progress_cap,
        })
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), GradingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GradingError::configuration(format!(
            "{key} must be a finite non-negative number, got {value}"
        )))
    }
}

impl GradingPolicy {
    /// 按当前策略计算迟交罚分
    pub fn apply_late_penalty(&self, raw_marks: f64, late_days: u32) -> f64 {
        apply_late_penalty_with(raw_marks, late_days, self.penalty_per_day, self.penalty_floor)
    }

    /// 分差是否需要第三评阅人仲裁（严格大于阈值）
    pub fn requires_arbitration(&self, first: f64, second: f64) -> bool {
        (first - second).abs() > self.arbitration_threshold
    }
}

/// 分数到等级，从高到低匹配
pub fn grade_from_marks(marks: f64) -> GradeLetter {
    if marks >= 90.0 {
        GradeLetter::AStar
    } else if marks >= 80.0 {
        GradeLetter::A
    } else if marks >= 70.0 {
        GradeLetter::B
    } else if marks >= 60.0 {
        GradeLetter::C
    } else if marks >= 50.0 {
        GradeLetter::D
    } else {
        GradeLetter::F
    }
}

/// 默认策略下的迟交罚分：每天 5 分，最低 50 分
pub fn apply_late_penalty(raw_marks: f64, late_days: u32) -> f64 {
    let policy = GradingPolicy::default();
    policy.apply_late_penalty(raw_marks, late_days)
}

fn apply_late_penalty_with(raw_marks: f64, late_days: u32, per_day: f64, floor: f64) -> f64 {
    // 下限对准时提交同样生效
    (raw_marks - per_day * f64::from(late_days)).max(floor)
}

/// 两位导师分数的平均值，四舍五入到整数
pub fn rounded_mean(first: f64, second: f64) -> f64 {
    ((first + second) / 2.0).round()
}
