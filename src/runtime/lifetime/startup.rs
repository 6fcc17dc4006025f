use crate::config::AppConfig;
use crate::engine::{GradingEngine, GradingPolicy};
use crate::errors::Result;
use crate::storage::{self, memory, register::debug_storage_registry};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub engine: Arc<GradingEngine>,
}

/// 准备服务器启动的上下文
/// 包括存储后端和评分引擎
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        debug_storage_registry();
        debug!("Debug mode: Storage registry is enabled");
    }

    // 先校验评分策略，配置错误时不初始化存储
    let policy = GradingPolicy::try_from(&config.grading)?;

    let storage = storage::create_storage(&config.storage.backend).await?;
    warn!("Storage backend '{}' initialized", config.storage.backend);
    if config.is_production() && config.storage.backend == memory::PLUGIN_NAME {
        warn!("Memory storage does not persist grading records across restarts");
    }

    warn!(
        "Grading policy: arbitration threshold {}, penalty {}/day (floor {}), progress awards {:?} (cap {})",
        policy.arbitration_threshold,
        policy.penalty_per_day,
        policy.penalty_floor,
        policy.progress_awards,
        policy.progress_cap
    );

    let engine = Arc::new(GradingEngine::new(storage, policy));
    Ok(StartupContext { engine })
}
