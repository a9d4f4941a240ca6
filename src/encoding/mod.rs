//! Canonical, deterministic operation encoding and hashing

pub mod canonical;

pub use canonical::{
    batch_hash, encode_batch, encode_transfer, transfer_hash, BATCH_TAG, TRANSFER_TAG,
};
