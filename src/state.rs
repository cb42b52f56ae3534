//! Application state: the shared word store and the loaded configuration.
//!
//! Built once at startup and shared across HTTP handlers and WebSocket
//! sessions. Word seeding order: JSON snapshot (SNAPSHOT_PATH) when one
//! exists, else config-file words, else the built-in seed list.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::seeds::seed_words;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub cfg: AppConfig,
}

impl AppState {
    /// Build state from env: load config, open the store with the right
    /// seed list.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();

        let seed = if cfg.words.is_empty() {
            info!(target: "typelearner_backend", "No configured words; using built-in seed list");
            seed_words()
        } else {
            cfg.words.iter().map(|w| w.to_entry()).collect()
        };

        let snapshot_path = std::env::var("SNAPSHOT_PATH").ok().map(PathBuf::from);
        let store = Arc::new(MemoryStore::open(snapshot_path, seed));

        Self { store, cfg }
    }

    /// State over an existing store, bypassing env lookup. Used by tests.
    pub fn with_store(store: Arc<MemoryStore>, cfg: AppConfig) -> Self {
        Self { store, cfg }
    }
}
