use std::sync::Arc;

use crate::errors::{GradingError, Result};
use crate::models::{
    projects::{entities::Project, requests::UpsertProjectRequest},
    submissions::{
        entities::{GradingCommit, SubmissionAttempt, SubmissionRecord},
        requests::SaveAttemptRequest,
    },
};

pub mod memory;
pub mod register;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 项目管理方法
    // 登记或更新项目的截止时间与评阅人，保留进度与仲裁标记
    async fn upsert_project(&self, project_id: &str, req: UpsertProjectRequest)
    -> Result<Project>;
    // 通过ID获取项目
    async fn get_project(&self, project_id: &str) -> Result<Option<Project>>;

    /// 提交记录方法
    // 获取学生在项目上的提交记录
    async fn get_submission_record(
        &self,
        project_id: &str,
        student_id: &str,
    ) -> Result<Option<SubmissionRecord>>;
    // 保存一次提交（首次保存时创建提交记录）
    async fn save_attempt(
        &self,
        project_id: &str,
        student_id: &str,
        req: SaveAttemptRequest,
    ) -> Result<SubmissionRecord>;

    /// 评分方法
    // 原子写入一次评分：替换提交并更新项目
    async fn commit_grading(&self, commit: GradingCommit) -> Result<(SubmissionAttempt, Project)>;
}

/// 按名称从插件注册表中创建存储后端
pub async fn create_storage(backend: &str) -> Result<Arc<dyn Storage>> {
    let constructor = register::get_storage_plugin(backend).ok_or_else(|| {
        GradingError::storage_plugin_not_found(format!(
            "Storage backend '{backend}' is not registered"
        ))
    })?;
    let storage = constructor().await?;
    Ok(Arc::from(storage))
}
