// src/core/storage/engine/mod.rs

//! The storage-engine abstraction the data-type layers are built against.
//!
//! The layers require an ordered, byte-addressable store with point reads,
//! atomic write batches, forward iteration in ascending key order, and
//! best-effort range maintenance hints. An LSM engine satisfies all of this
//! natively; [`memory::MemoryEngine`] provides the same contract in memory.

pub mod memory;

pub use self::memory::MemoryEngine;

use crate::core::OpalDBError;
use bytes::Bytes;

/// A contiguous span of the physical keyspace: start inclusive, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Vec<u8>,
    pub end: Vec<u8>,
}

/// A group of staged puts and deletes committed as one atomic unit.
///
/// Nothing staged in a batch is visible until [`Engine::write`] commits it;
/// a batch dropped without committing leaves the store untouched.
pub trait WriteBatch {
    fn put(&mut self, key: &[u8], value: &[u8]);
    fn delete(&mut self, key: &[u8]);
    /// Number of staged operations.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A forward cursor over the whole store in ascending byte order.
///
/// Iterators pin engine resources (snapshots, file handles) until dropped.
/// `key` and `value` must only be called while `valid` returns true.
pub trait StoreIterator {
    fn seek(&mut self, key: &[u8]);
    fn valid(&self) -> bool;
    fn key(&self) -> &[u8];
    fn value(&self) -> &[u8];
    fn next(&mut self);
}

/// The minimal contract the data-type layers require from an engine.
pub trait Engine: Send + Sync {
    type Batch: WriteBatch;
    type Iter: StoreIterator;

    /// Point lookup; `None` when the key is absent.
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>, OpalDBError>;

    /// Unbatched single-key write.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), OpalDBError>;

    fn new_write_batch(&self) -> Self::Batch;

    /// Commits every staged operation in `batch` atomically.
    fn write(&self, batch: Self::Batch) -> Result<(), OpalDBError>;

    /// Opens a forward iterator over the whole store.
    fn iterator(&self) -> Result<Self::Iter, OpalDBError>;

    /// Best-effort hint: drop whole storage files fully covered by `range`.
    /// Correctness must never depend on this removing anything.
    fn delete_files_in_range(&self, range: &KeyRange) -> Result<(), OpalDBError>;

    /// Best-effort hint: compact the physical data within `range`.
    fn compact_range(&self, range: &KeyRange) -> Result<(), OpalDBError>;
}
