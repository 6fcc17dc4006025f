pub mod common;
pub mod grading;
pub mod projects;
pub mod submissions;

pub use common::response::ApiResponse;

use chrono::{DateTime, Utc};

// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 项目 / 提交
    ProjectNotFound = 3001,
    SubmissionNotFound = 3002,

    // 评分
    MarkerNotAssigned = 4001,
}
