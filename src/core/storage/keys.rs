// src/core/storage/keys.rs

//! Physical key encoding for the shared, sorted keyspace.
//!
//! Every physical key begins with a single type byte so that distinct data
//! types can interleave in one ordered keyspace without collisions. The list
//! layer consumes `LMETA_TYPE` and `LIST_TYPE`; the remaining bytes are
//! reserved for the data types that coexist in the same store.

use crate::core::OpalDBError;

// Type bytes are part of the persisted format and must never be reused or
// reordered.
pub const STRING_TYPE: u8 = b'k';
pub const HASH_TYPE: u8 = b'h';
pub const HSIZE_TYPE: u8 = b'H';
pub const LIST_TYPE: u8 = b'l';
pub const LMETA_TYPE: u8 = b'L';
pub const SET_TYPE: u8 = b's';
pub const SSIZE_TYPE: u8 = b'S';
pub const ZSET_TYPE: u8 = b'z';
pub const ZSIZE_TYPE: u8 = b'Z';

/// Rejects logical keys the layer will not address: empty keys and keys
/// longer than the configured maximum.
pub fn check_key_size(key: &[u8], max_key_size: usize) -> Result<(), OpalDBError> {
    if key.is_empty() || key.len() > max_key_size {
        return Err(OpalDBError::InvalidKeySize);
    }
    Ok(())
}

/// Encodes the metadata key for a list: `[LMETA_TYPE][key]`.
pub fn encode_list_meta_key(key: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(key.len() + 1);
    buf.push(LMETA_TYPE);
    buf.extend_from_slice(key);
    buf
}

/// Recovers the logical key from an encoded metadata key.
pub fn decode_list_meta_key(ek: &[u8]) -> Result<&[u8], OpalDBError> {
    match ek.split_first() {
        Some((&LMETA_TYPE, key)) => Ok(key),
        _ => Err(OpalDBError::InvalidListMetaKey),
    }
}

/// Lower bound of the whole list-metadata namespace, for admin scans.
pub fn list_meta_min_key() -> Vec<u8> {
    vec![LMETA_TYPE]
}

/// Exclusive upper bound of the list-metadata namespace.
pub fn list_meta_max_key() -> Vec<u8> {
    vec![LMETA_TYPE + 1]
}

/// Encodes an element key: `[LIST_TYPE][len(key): u16 BE][key][seq: u32 BE]`.
///
/// The sequence is stored as `u32` but interpreted as `i32`; every live
/// sequence is positive, so lexicographic byte order equals numeric order.
pub fn encode_list_key(key: &[u8], seq: i32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(key.len() + 7);
    buf.push(LIST_TYPE);
    buf.extend_from_slice(&(key.len() as u16).to_be_bytes());
    buf.extend_from_slice(key);
    buf.extend_from_slice(&(seq as u32).to_be_bytes());
    buf
}

/// Recovers the logical key and sequence from an encoded element key.
pub fn decode_list_key(ek: &[u8]) -> Result<(&[u8], i32), OpalDBError> {
    if ek.len() < 3 || ek[0] != LIST_TYPE {
        return Err(OpalDBError::InvalidListKey);
    }
    let key_len = u16::from_be_bytes([ek[1], ek[2]]) as usize;
    if key_len + 7 != ek.len() {
        return Err(OpalDBError::InvalidListKey);
    }
    let key = &ek[3..3 + key_len];
    let pos = 3 + key_len;
    let seq = u32::from_be_bytes([ek[pos], ek[pos + 1], ek[pos + 2], ek[pos + 3]]) as i32;
    Ok((key, seq))
}
