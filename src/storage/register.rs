use crate::errors::Result;
use crate::storage::Storage;
use futures_util::future::BoxFuture;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

pub type BoxedStorageFuture = BoxFuture<'static, Result<Box<dyn Storage>>>;
pub type StorageConstructor = Arc<dyn Fn() -> BoxedStorageFuture + Send + Sync>;

static STORAGE_REGISTRY: Lazy<RwLock<HashMap<String, StorageConstructor>>> = Lazy::new(|| {
    let mut registry: HashMap<String, StorageConstructor> = HashMap::new();
    registry.insert(
        super::memory::PLUGIN_NAME.to_string(),
        Arc::new(super::memory::construct),
    );
    RwLock::new(registry)
});

pub fn register_storage_plugin<S: Into<String>>(name: S, constructor: StorageConstructor) {
    let name = name.into();
    let mut registry = STORAGE_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    registry.insert(name, constructor);
}

pub fn get_storage_plugin(name: &str) -> Option<StorageConstructor> {
    STORAGE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

pub fn debug_storage_registry() {
    let registry = STORAGE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    if registry.is_empty() {
        tracing::debug!("No storage plugins registered.");
    } else {
        tracing::debug!("Registered storage plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn test_memory_backend_is_builtin() {
        assert!(get_storage_plugin("memory").is_some());
        assert!(get_storage_plugin("sqlite").is_none());
    }

    #[tokio::test]
    async fn test_register_custom_backend() {
        register_storage_plugin(
            "memory-test",
            Arc::new(|| -> BoxedStorageFuture {
                Box::pin(async { Ok(Box::new(MemoryStorage::new()) as Box<dyn Storage>) })
            }),
        );
        let storage = crate::storage::create_storage("memory-test").await;
        assert!(storage.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_backend_errors() {
        let err = crate::storage::create_storage("nope").await.err().unwrap();
        assert_eq!(err.code(), "E006");
    }
}
