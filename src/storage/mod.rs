//! JSON persistence for wallet and ledger state

pub mod persistence;

pub use persistence::{Storage, StorageConfig, StorageError};
