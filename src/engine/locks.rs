//! 按提交加锁
//!
//! 同一 (项目, 学生, 提交序号) 的 读台账 → 判定 → 追加 → 写入 必须串行，
//! 不同提交之间互不影响。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    pub project_id: String,
    pub student_id: String,
    pub attempt_index: u8,
}

impl std::fmt::Display for AttemptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}#{}",
            self.project_id, self.student_id, self.attempt_index
        )
    }
}

/// 提交级互斥锁表
#[derive(Default)]
pub struct AttemptLocks {
    locks: Arc<DashMap<AttemptKey, Arc<Mutex<()>>>>,
}

impl AttemptLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取某次提交的写锁，守卫释放时自动清理空闲条目
    pub async fn acquire(&self, key: AttemptKey) -> AttemptGuard {
        let mutex = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;
        debug!("Acquired grading lock for attempt {}", key);

        AttemptGuard {
            guard: Some(guard),
            key,
            locks: self.locks.clone(),
        }
    }

    /// 当前持有的锁条目数
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

pub struct AttemptGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: AttemptKey,
    locks: Arc<DashMap<AttemptKey, Arc<Mutex<()>>>>,
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        // 先释放互斥锁，再在无人等待时移除条目
        self.guard.take();
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
