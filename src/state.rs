use crate::config::Config;
use crate::item_store::ItemStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub item_store: ItemStore,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh in-memory store, plus a handle to that store
    pub fn in_memory() -> (Self, crate::kv::MemoryKv) {
        let kv = crate::kv::MemoryKv::new();
        let config = Config::from_lookup(|name| {
            (name == "STORE_BACKEND").then(|| "memory".to_string())
        })
        .expect("default config is valid");

        let state = AppState {
            item_store: ItemStore::new(Arc::new(kv.clone())),
            config: Arc::new(config),
        };
        (state, kv)
    }
}
