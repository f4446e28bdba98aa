// src/core/errors.rs

//! Defines the primary error type for the entire storage layer.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures within the layer.
/// Using `thiserror` allows for clean error definitions and automatic `From` trait implementations.
#[derive(Error, Debug)]
pub enum OpalDBError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("invalid key size")]
    InvalidKeySize,

    #[error("invalid lmeta key")]
    InvalidListMetaKey,

    #[error("invalid list key")]
    InvalidListKey,

    #[error("invalid list sequence, overflow")]
    ListSequenceOverflow,

    #[error("index out of range")]
    IndexOutOfRange,

    #[error("trim invalid")]
    TrimInvalid,

    #[error("Internal Storage Error: {0}")]
    Internal(String),
}

// Manual implementation of Clone because `std::io::Error` is not cloneable.
// We wrap it in an Arc to allow for cheap, shared cloning.
impl Clone for OpalDBError {
    fn clone(&self) -> Self {
        match self {
            OpalDBError::Io(e) => OpalDBError::Io(Arc::clone(e)),
            OpalDBError::InvalidKeySize => OpalDBError::InvalidKeySize,
            OpalDBError::InvalidListMetaKey => OpalDBError::InvalidListMetaKey,
            OpalDBError::InvalidListKey => OpalDBError::InvalidListKey,
            OpalDBError::ListSequenceOverflow => OpalDBError::ListSequenceOverflow,
            OpalDBError::IndexOutOfRange => OpalDBError::IndexOutOfRange,
            OpalDBError::TrimInvalid => OpalDBError::TrimInvalid,
            OpalDBError::Internal(s) => OpalDBError::Internal(s.clone()),
        }
    }
}

impl PartialEq for OpalDBError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OpalDBError::Io(e1), OpalDBError::Io(e2)) => e1.to_string() == e2.to_string(),
            (OpalDBError::Internal(s1), OpalDBError::Internal(s2)) => s1 == s2,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for OpalDBError {
    fn from(e: std::io::Error) -> Self {
        OpalDBError::Io(Arc::new(e))
    }
}
