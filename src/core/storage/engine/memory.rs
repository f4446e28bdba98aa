// src/core/storage/engine/memory.rs

//! An ordered in-memory engine used for embedding and tests.
//!
//! Provides the exact semantics the data-type layers expect from a
//! persistent LSM engine: ascending byte-ordered iteration and atomic write
//! batches. The range maintenance hints are no-ops since there are no
//! storage files to drop or compact.

use super::{Engine, KeyRange, StoreIterator, WriteBatch};
use crate::core::OpalDBError;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

type SharedMap = Arc<RwLock<BTreeMap<Vec<u8>, Bytes>>>;

/// A `BTreeMap`-backed engine. Cloning yields another handle to the same
/// underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    map: SharedMap,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live physical keys, across all data types.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

enum BatchOp {
    Put(Vec<u8>, Bytes),
    Delete(Vec<u8>),
}

/// Staged operations, applied under a single write lock on commit.
#[derive(Default)]
pub struct MemoryWriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch for MemoryWriteBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops
            .push(BatchOp::Put(key.to_vec(), Bytes::copy_from_slice(value)));
    }

    fn delete(&mut self, key: &[u8]) {
        self.ops.push(BatchOp::Delete(key.to_vec()));
    }

    fn len(&self) -> usize {
        self.ops.len()
    }
}

/// A seek-based cursor holding its current entry by value.
///
/// The cursor re-enters the shared map on every step, so it observes writes
/// committed while it is open. The layers only iterate within a single
/// operation, which the surrounding server serializes per key.
pub struct MemoryIterator {
    map: SharedMap,
    current: Option<(Vec<u8>, Bytes)>,
}

impl StoreIterator for MemoryIterator {
    fn seek(&mut self, key: &[u8]) {
        let map = self.map.read();
        self.current = map
            .range::<[u8], _>((Bound::Included(key), Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| k.as_slice()).unwrap_or(&[])
    }

    fn value(&self) -> &[u8] {
        self.current.as_ref().map(|(_, v)| v.as_ref()).unwrap_or(&[])
    }

    fn next(&mut self) {
        let Some((cur, _)) = self.current.take() else {
            return;
        };
        let map = self.map.read();
        self.current = map
            .range::<[u8], _>((Bound::Excluded(cur.as_slice()), Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()));
    }
}

impl Engine for MemoryEngine {
    type Batch = MemoryWriteBatch;
    type Iter = MemoryIterator;

    fn get(&self, key: &[u8]) -> Result<Option<Bytes>, OpalDBError> {
        Ok(self.map.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), OpalDBError> {
        self.map
            .write()
            .insert(key.to_vec(), Bytes::copy_from_slice(value));
        Ok(())
    }

    fn new_write_batch(&self) -> Self::Batch {
        MemoryWriteBatch::default()
    }

    fn write(&self, batch: Self::Batch) -> Result<(), OpalDBError> {
        let mut map = self.map.write();
        for op in batch.ops {
            match op {
                BatchOp::Put(key, value) => {
                    map.insert(key, value);
                }
                BatchOp::Delete(key) => {
                    map.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn iterator(&self) -> Result<Self::Iter, OpalDBError> {
        Ok(MemoryIterator {
            map: Arc::clone(&self.map),
            current: None,
        })
    }

    fn delete_files_in_range(&self, _range: &KeyRange) -> Result<(), OpalDBError> {
        Ok(())
    }

    fn compact_range(&self, _range: &KeyRange) -> Result<(), OpalDBError> {
        Ok(())
    }
}
