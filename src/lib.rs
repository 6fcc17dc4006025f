//! Grading Engine - 提交评分与共识服务
//!
//! 基于 Actix Web 构建，把学生每次提交的评分记录转换为最终成绩。
//!
//! # 架构
//! - `config`: 配置管理
//! - `engine`: 评分引擎（罚分、评阅身份、台账、共识、进度）
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（插件注册 + 内存实现）
//! - `utils`: 工具函数

pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
