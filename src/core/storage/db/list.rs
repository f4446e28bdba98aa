// src/core/storage/db/list.rs

//! The list data-type layer.
//!
//! A list is a contiguous run of element records bracketed by one metadata
//! record. Elements are addressed by a 32-bit sequence inside a bounded
//! window; head pushes grow the run downwards and tail pushes grow it
//! upwards, so neither end ever shifts existing elements. Every mutation
//! stages its element writes and the metadata update into one engine batch
//! and commits once.

use super::core::Db;
use crate::core::OpalDBError;
use crate::core::storage::engine::{Engine, KeyRange, StoreIterator, WriteBatch};
use crate::core::storage::keys;
use bytes::Bytes;
use tracing::{debug, warn};

/// Exclusive lower bound of the live sequence window.
pub const LIST_MIN_SEQ: i32 = 1000;
/// Exclusive upper bound of the live sequence window: 2^31 - 1000.
pub const LIST_MAX_SEQ: i32 = ((1i64 << 31) - 1000) as i32;
/// Sequence assigned to the first element of a fresh list; growth then moves
/// the head down and the tail up from here.
pub const LIST_INITIAL_SEQ: i32 = LIST_MIN_SEQ + (LIST_MAX_SEQ - LIST_MIN_SEQ) / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListEnd {
    Head,
    Tail,
}

/// Decoded per-list metadata. `size` is zero exactly when the record is
/// absent; head and tail then carry the implicit initial sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListMeta {
    head_seq: i32,
    tail_seq: i32,
    size: i32,
}

impl<E: Engine> Db<E> {
    /// Prepends values to the list, creating it if absent.
    /// Returns the resulting size.
    pub fn lpush(&self, key: &[u8], values: &[Bytes]) -> Result<i64, OpalDBError> {
        self.push(key, ListEnd::Head, values)
    }

    /// Appends values to the list, creating it if absent.
    /// Returns the resulting size.
    pub fn rpush(&self, key: &[u8], values: &[Bytes]) -> Result<i64, OpalDBError> {
        self.push(key, ListEnd::Tail, values)
    }

    /// Removes and returns the head element, or `None` when the list is empty.
    pub fn lpop(&self, key: &[u8]) -> Result<Option<Bytes>, OpalDBError> {
        self.pop(key, ListEnd::Head)
    }

    /// Removes and returns the tail element, or `None` when the list is empty.
    pub fn rpop(&self, key: &[u8]) -> Result<Option<Bytes>, OpalDBError> {
        self.pop(key, ListEnd::Tail)
    }

    /// Returns the element at the logical index (negative counts from the
    /// tail). Out-of-range indices miss and return `None`.
    pub fn lindex(&self, key: &[u8], index: i32) -> Result<Option<Bytes>, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;

        let seq = index_to_seq(&meta, index);
        self.engine.get(&keys::encode_list_key(key, seq))
    }

    /// Overwrites the element at the logical index.
    /// Fails with `IndexOutOfRange` when the index resolves outside the list.
    pub fn lset(&self, key: &[u8], index: i32, value: &[u8]) -> Result<(), OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;

        // An absent list has an implicit meta window that would admit the
        // initial sequence; no index is valid against it.
        if meta.size == 0 {
            return Err(OpalDBError::IndexOutOfRange);
        }

        let seq = index_to_seq(&meta, index);
        if seq < meta.head_seq || seq > meta.tail_seq {
            return Err(OpalDBError::IndexOutOfRange);
        }
        self.engine.put(&keys::encode_list_key(key, seq), value)
    }

    /// Returns the elements between the logical indices `start` and `stop`,
    /// inclusive, after Redis-style negative-index conversion and clamping.
    pub fn lrange(&self, key: &[u8], start: i32, stop: i32) -> Result<Vec<Bytes>, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;
        let llen = meta.size;

        let mut start = if start < 0 { llen + start } else { start };
        let mut stop = if stop < 0 { llen + stop } else { stop };
        if start < 0 {
            start = 0;
        }
        if start > stop || start >= llen {
            return Ok(Vec::new());
        }
        if stop >= llen {
            stop = llen - 1;
        }

        let limit = (stop - start + 1) as usize;
        let mut values = Vec::with_capacity(limit);

        // The element run is dense and contiguous under the engine's byte
        // order, so a counted forward walk needs no upper-key comparison.
        let mut it = self.engine.iterator()?;
        it.seek(&keys::encode_list_key(key, meta.head_seq + start));
        while it.valid() {
            values.push(Bytes::copy_from_slice(it.value()));
            if values.len() >= limit {
                break;
            }
            it.next();
        }
        Ok(values)
    }

    /// Returns the size of the list; zero when absent.
    pub fn llen(&self, key: &[u8]) -> Result<i64, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;
        Ok(meta.size as i64)
    }

    /// Classic LTRIM: retains the elements between `start` and `stop` after
    /// negative-index conversion, deleting everything outside the window.
    ///
    /// Rejection of an empty-or-inverted window happens after the negative
    /// conversion but before `start` is clamped to zero.
    pub fn ltrim(&self, key: &[u8], start: i64, stop: i64) -> Result<(), OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;
        let llen = meta.size;

        let mut start = start as i32;
        let mut stop = stop as i32;
        if start < 0 {
            start += llen;
        }
        if stop < 0 {
            stop += llen;
        }
        if start >= llen || start > stop {
            return Err(OpalDBError::TrimInvalid);
        }
        if start < 0 {
            start = 0;
        }
        if stop >= llen {
            stop = llen - 1;
        }

        let mut batch = self.engine.new_write_batch();
        for i in 0..start {
            batch.delete(&keys::encode_list_key(key, meta.head_seq + i));
        }
        for i in (stop + 1)..llen {
            batch.delete(&keys::encode_list_key(key, meta.head_seq + i));
        }

        self.l_set_meta(
            &meta_key,
            meta.head_seq + start,
            meta.head_seq + stop,
            &mut batch,
        )?;
        self.engine.write(batch)
    }

    /// Deletes up to `trim_size` elements from the head.
    /// Returns the number of elements actually removed.
    pub fn ltrim_front(&self, key: &[u8], trim_size: i32) -> Result<i32, OpalDBError> {
        self.trim_count(key, trim_size, ListEnd::Head)
    }

    /// Deletes up to `trim_size` elements from the tail.
    /// Returns the number of elements actually removed.
    pub fn ltrim_back(&self, key: &[u8], trim_size: i32) -> Result<i32, OpalDBError> {
        self.trim_count(key, trim_size, ListEnd::Tail)
    }

    /// Removes the whole list in one batch.
    /// Returns the number of element records deleted.
    pub fn lclear(&self, key: &[u8]) -> Result<i64, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let mut batch = self.engine.new_write_batch();
        let num = self.l_delete(key, &mut batch)?;
        if let Err(err) = self.engine.write(batch) {
            warn!("lclear commit failed, list may be left partially deleted: {err}");
            return Err(err);
        }
        Ok(num as i64)
    }

    /// Removes every given list in one shared batch. Best-effort: returns the
    /// number of keys processed, not the number of elements deleted.
    pub fn lmclear(&self, list_keys: &[&[u8]]) -> Result<i64, OpalDBError> {
        let mut batch = self.engine.new_write_batch();
        for key in list_keys {
            keys::check_key_size(key, self.config.max_key_size)?;
            self.l_delete(key, &mut batch)?;
        }
        if let Err(err) = self.engine.write(batch) {
            warn!("lmclear commit failed, lists may be left partially deleted: {err}");
            return Err(err);
        }
        Ok(list_keys.len() as i64)
    }

    /// Whether the list exists, via a point lookup on its metadata record.
    pub fn lkey_exists(&self, key: &[u8]) -> Result<bool, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        Ok(self.engine.get(&meta_key)?.is_some())
    }

    fn push(&self, key: &[u8], end: ListEnd, values: &[Bytes]) -> Result<i64, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;

        let push_cnt = values.len();
        if push_cnt == 0 {
            return Ok(meta.size as i64);
        }

        let (mut seq, delta) = match end {
            ListEnd::Head => (meta.head_seq, -1i32),
            ListEnd::Tail => (meta.tail_seq, 1i32),
        };
        // The first element of a fresh list takes the initial sequence
        // directly; only a non-empty list strides past its current end.
        if meta.size > 0 {
            seq += delta;
        }

        // Bounds check in 64-bit so a pathological batch size cannot wrap.
        let check_seq = seq as i64 + (push_cnt as i64 - 1) * delta as i64;
        if check_seq <= LIST_MIN_SEQ as i64 || check_seq >= LIST_MAX_SEQ as i64 {
            return Err(OpalDBError::ListSequenceOverflow);
        }

        let mut batch = self.engine.new_write_batch();
        for (i, value) in values.iter().enumerate() {
            let ek = keys::encode_list_key(key, seq + i as i32 * delta);
            batch.put(&ek, value);
        }
        seq += (push_cnt as i32 - 1) * delta;

        let (head_seq, tail_seq) = match end {
            ListEnd::Head => (seq, meta.tail_seq),
            ListEnd::Tail => (meta.head_seq, seq),
        };
        self.l_set_meta(&meta_key, head_seq, tail_seq, &mut batch)?;
        self.engine.write(batch)?;

        Ok(meta.size as i64 + push_cnt as i64)
    }

    fn pop(&self, key: &[u8], end: ListEnd) -> Result<Option<Bytes>, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;
        if meta.size == 0 {
            return Ok(None);
        }

        let seq = match end {
            ListEnd::Head => meta.head_seq,
            ListEnd::Tail => meta.tail_seq,
        };
        let item_key = keys::encode_list_key(key, seq);
        let value = self.engine.get(&item_key)?;

        let (head_seq, tail_seq) = match end {
            ListEnd::Head => (meta.head_seq + 1, meta.tail_seq),
            ListEnd::Tail => (meta.head_seq, meta.tail_seq - 1),
        };

        let mut batch = self.engine.new_write_batch();
        batch.delete(&item_key);
        // Popping the last element drives the size to zero, which stages the
        // metadata delete as well.
        self.l_set_meta(&meta_key, head_seq, tail_seq, &mut batch)?;
        self.engine.write(batch)?;

        Ok(value)
    }

    fn trim_count(&self, key: &[u8], trim_size: i32, end: ListEnd) -> Result<i32, OpalDBError> {
        keys::check_key_size(key, self.config.max_key_size)?;

        if trim_size <= 0 {
            return Ok(0);
        }

        let meta_key = keys::encode_list_meta_key(key);
        let meta = self.l_get_meta(&meta_key)?;
        if meta.size == 0 {
            return Ok(0);
        }

        // Clamp the trim window to the live run in 64-bit arithmetic.
        let (trim_start, trim_end, head_seq, tail_seq) = match end {
            ListEnd::Head => {
                let trim_start = meta.head_seq;
                let trim_end =
                    (trim_start as i64 + trim_size as i64 - 1).min(meta.tail_seq as i64) as i32;
                (trim_start, trim_end, trim_end + 1, meta.tail_seq)
            }
            ListEnd::Tail => {
                let trim_end = meta.tail_seq;
                let trim_start =
                    (trim_end as i64 - trim_size as i64 + 1).max(meta.head_seq as i64) as i32;
                (trim_start, trim_end, meta.head_seq, trim_start - 1)
            }
        };

        let mut batch = self.engine.new_write_batch();
        for trim_seq in trim_start..=trim_end {
            batch.delete(&keys::encode_list_key(key, trim_seq));
        }
        self.l_set_meta(&meta_key, head_seq, tail_seq, &mut batch)?;
        self.engine.write(batch)?;

        Ok(trim_end - trim_start + 1)
    }

    /// Stages deletion of every element record and the metadata record for
    /// `key`, returning the count of element records staged. A metadata
    /// record that cannot be read is treated as an absent list, keeping
    /// multi-key clears best-effort.
    fn l_delete(&self, key: &[u8], batch: &mut E::Batch) -> Result<u64, OpalDBError> {
        let meta_key = keys::encode_list_meta_key(key);
        let Ok(meta) = self.l_get_meta(&meta_key) else {
            return Ok(0);
        };

        let start_key = keys::encode_list_key(key, meta.head_seq);
        let stop_key = keys::encode_list_key(key, meta.tail_seq);

        if meta.size as i64 > self.config.range_delete_threshold {
            // Large run: hint the engine to drop covered files and compact
            // before the per-key pass. Failures here cost nothing.
            debug!(
                size = meta.size,
                "escalating list delete to engine range hints"
            );
            let range = KeyRange {
                start: start_key.clone(),
                end: stop_key.clone(),
            };
            if let Err(err) = self.engine.delete_files_in_range(&range) {
                debug!("delete_files_in_range hint failed: {err}");
            }
            if let Err(err) = self.engine.compact_range(&range) {
                debug!("compact_range hint failed: {err}");
            }
        }

        let mut num = 0u64;
        let mut it = self.engine.iterator()?;
        it.seek(&start_key);
        while it.valid() {
            let raw_key = it.key();
            if raw_key > stop_key.as_slice() {
                break;
            }
            batch.delete(raw_key);
            num += 1;
            it.next();
        }

        batch.delete(&meta_key);
        Ok(num)
    }

    /// Loads per-list metadata. An absent record yields the implicit empty
    /// list at the initial sequence without writing anything.
    fn l_get_meta(&self, meta_key: &[u8]) -> Result<ListMeta, OpalDBError> {
        match self.engine.get(meta_key)? {
            None => Ok(ListMeta {
                head_seq: LIST_INITIAL_SEQ,
                tail_seq: LIST_INITIAL_SEQ,
                size: 0,
            }),
            Some(v) => {
                if v.len() != 8 {
                    return Err(OpalDBError::InvalidListMetaKey);
                }
                let head_seq = i32::from_be_bytes([v[0], v[1], v[2], v[3]]);
                let tail_seq = i32::from_be_bytes([v[4], v[5], v[6], v[7]]);
                let size = (tail_seq as i64 - head_seq as i64 + 1) as i32;
                Ok(ListMeta {
                    head_seq,
                    tail_seq,
                    size,
                })
            }
        }
    }

    /// Stages the metadata record for the given bounds: a put while the list
    /// remains non-empty, a delete once it drains. Returns the new size.
    fn l_set_meta(
        &self,
        meta_key: &[u8],
        head_seq: i32,
        tail_seq: i32,
        batch: &mut E::Batch,
    ) -> Result<i32, OpalDBError> {
        let size = tail_seq as i64 - head_seq as i64 + 1;
        if size < 0 {
            return Err(OpalDBError::ListSequenceOverflow);
        }
        if size == 0 {
            batch.delete(meta_key);
        } else {
            let mut buf = [0u8; 8];
            buf[0..4].copy_from_slice(&head_seq.to_be_bytes());
            buf[4..8].copy_from_slice(&tail_seq.to_be_bytes());
            batch.put(meta_key, &buf);
        }
        Ok(size as i32)
    }
}

/// Maps a logical index to a sequence: non-negative from the head, negative
/// from the tail. Wrapping arithmetic keeps extreme indices a plain miss
/// instead of a panic.
fn index_to_seq(meta: &ListMeta, index: i32) -> i32 {
    if index >= 0 {
        meta.head_seq.wrapping_add(index)
    } else {
        meta.tail_seq.wrapping_add(index).wrapping_add(1)
    }
}
