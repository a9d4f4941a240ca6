//! State persistence
//!
//! Saves and loads the wallet registry (including consumed sequence
//! counters) together with the test ledger as a single JSON document,
//! written atomically via a temp-file rename.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

use crate::ledger::MemoryLedger;
use crate::wallet::WalletManager;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".cosign_data"),
            state_file: "state.json".to_string(),
        }
    }
}

/// On-disk shape of the persisted state
#[derive(Serialize, Deserialize)]
struct StateFile {
    wallets: WalletManager,
    ledger: MemoryLedger,
}

/// Wallet state storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    fn state_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.state_file)
    }

    /// Save the manager and ledger to disk
    pub fn save(&self, wallets: &WalletManager, ledger: &MemoryLedger) -> Result<(), StorageError> {
        let path = self.state_path();

        // Write to a temporary file first, then rename atomically
        let temp_path = self.config.data_dir.join("state.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        let state = StateFile {
            wallets: wallets.clone(),
            ledger: ledger.clone(),
        };
        serde_json::to_writer_pretty(writer, &state)?;

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Load the manager and ledger from disk
    pub fn load(&self) -> Result<(WalletManager, MemoryLedger), StorageError> {
        let path = self.state_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "State file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        let state: StateFile = serde_json::from_reader(reader)?;
        Ok((state.wallets, state.ledger))
    }

    /// Check if a saved state exists
    pub fn exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Delete the saved state
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
