use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评阅人在项目中的身份
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum MarkerRole {
    SupervisorFirst,  // 第一导师
    SupervisorSecond, // 第二导师
    ThirdMarker,      // 第三评阅人
}

impl MarkerRole {
    pub const SUPERVISOR_FIRST: &'static str = "supervisor_first";
    pub const SUPERVISOR_SECOND: &'static str = "supervisor_second";
    pub const THIRD_MARKER: &'static str = "third_marker";

    /// 是否为导师（参与平均分计算）
    pub fn is_supervisor(&self) -> bool {
        matches!(self, MarkerRole::SupervisorFirst | MarkerRole::SupervisorSecond)
    }
}

impl std::fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerRole::SupervisorFirst => write!(f, "{}", Self::SUPERVISOR_FIRST),
            MarkerRole::SupervisorSecond => write!(f, "{}", Self::SUPERVISOR_SECOND),
            MarkerRole::ThirdMarker => write!(f, "{}", Self::THIRD_MARKER),
        }
    }
}

// 等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum GradeLetter {
    #[serde(rename = "A*")]
    AStar,
    A,
    B,
    C,
    D,
    F,
}

impl GradeLetter {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::AStar => "A*",
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::F => "F",
        }
    }
}

impl std::fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 单次提交的共识状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum ConsensusState {
    #[default]
    Pending, // 等待（第二位）导师评分
    FinalizedByAverage,     // 两位导师取平均
    FinalizedBySingle,      // 仅一位导师
    FinalizedByThirdMarker, // 第三评阅人裁定
    AwaitingArbitration,    // 分歧过大，等待第三评阅人
}

impl ConsensusState {
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ConsensusState::FinalizedByAverage
                | ConsensusState::FinalizedBySingle
                | ConsensusState::FinalizedByThirdMarker
        )
    }
}

/// 分项评价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct CategoryAssessment {
    pub category: String,
    pub grade: String,
}

/// 一位评阅人对一次提交的评分记录，写入后不可修改
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingEntry {
    pub id: String,
    pub marker_id: String,
    pub role: MarkerRole,
    pub marks: f64,     // 扣除迟交罚分后的分数
    pub raw_marks: f64, // 评阅人给出的原始分数
    pub late_days: u32,
    pub grade: GradeLetter,
    pub summative_assessment: Vec<CategoryAssessment>,
    pub justification: String,
    pub formative_feedback: Option<String>,
    pub graded_at: DateTime<Utc>,
}
