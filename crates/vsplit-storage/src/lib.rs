//! S3-compatible object store adapter.
//!
//! This crate provides:
//! - Object download/upload by (bucket, key)
//! - Upsert upload semantics (put-object always overwrites)
//! - A `NotFound`-aware error taxonomy for missing source objects

pub mod client;
pub mod error;

pub use client::{S3Client, StoreConfig};
pub use error::{StorageError, StorageResult};
