use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 保存提交请求（文件上传后由提交服务调用）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SaveAttemptRequest {
    pub attempt_index: u8,
    pub artifact_ref: String,
    pub created_at: Option<DateTime<Utc>>, // 缺省为当前时间
}
