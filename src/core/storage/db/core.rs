// src/core/storage/db/core.rs

use crate::config::StorageConfig;
use crate::core::storage::engine::{Engine, MemoryEngine};

/// `Db` exposes the data-type layers over a single underlying engine.
///
/// The struct holds no state of its own beyond the engine handle and the
/// tunables; all durable state lives in the engine. It takes no locks and
/// gives no isolation guarantees across concurrent operations — the
/// surrounding server is expected to serialize operations per logical key.
#[derive(Debug, Clone)]
pub struct Db<E: Engine> {
    pub(crate) engine: E,
    pub(crate) config: StorageConfig,
}

impl<E: Engine> Db<E> {
    pub fn new(engine: E, config: StorageConfig) -> Self {
        Self { engine, config }
    }

    /// The underlying engine handle, for admin scans and tests.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl Db<MemoryEngine> {
    /// An in-memory database with default tunables.
    pub fn memory() -> Self {
        Db::new(MemoryEngine::new(), StorageConfig::default())
    }
}
