//! Wallet registry and authorize-and-send interface
//!
//! Front door of the engine: holds the wallets, runs the authorization
//! pipeline, and executes transfers against the hosting ledger. Sequence
//! consumption happens inside authorization, so an execution failure
//! (insufficient funds, recipient rejection) is reported distinctly and
//! permanently burns the sequence id: a retry needs a fresh operation
//! with the next id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::crypto::{Address, Signature};
use crate::engine::{execute_batch, execute_transfer, AuthorizationEngine};
use crate::ledger::Ledger;
use crate::wallet::operation::{BatchOperation, BatchRecord, Operation, TransferRecord};
use crate::wallet::wallet::{Wallet, WalletError};

/// Registry of co-signed wallets plus the authorization engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletManager {
    wallets: HashMap<Address, Wallet>,
    engine: AuthorizationEngine,
}

impl WalletManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new wallet from its signer set
    pub fn create_wallet(
        &mut self,
        signers: Vec<Address>,
        label: Option<String>,
    ) -> Result<Wallet, WalletError> {
        let wallet = Wallet::new(signers, label)?;

        // Same signer set derives the same address; return the existing
        // wallet instead of resetting anything
        if let Some(existing) = self.wallets.get(&wallet.address()) {
            return Ok(existing.clone());
        }

        self.wallets.insert(wallet.address(), wallet.clone());
        Ok(wallet)
    }

    /// Get a wallet by address
    pub fn get_wallet(&self, address: &Address) -> Option<&Wallet> {
        self.wallets.get(address)
    }

    /// List all wallets
    pub fn list_wallets(&self) -> Vec<&Wallet> {
        self.wallets.values().collect()
    }

    /// Number of registered wallets
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Read-only query: the next sequence id the wallet accepts
    pub fn next_sequence_id(&self, wallet: &Address) -> Result<u64, WalletError> {
        if !self.wallets.contains_key(wallet) {
            return Err(WalletError::WalletNotFound(*wallet));
        }
        Ok(self.engine.next_sequence_id(wallet))
    }

    /// Authorize and execute a single-recipient transfer at the current time
    pub fn send<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        wallet: &Address,
        operation: &Operation,
        signature: &Signature,
        submitter: &Address,
    ) -> Result<TransferRecord, WalletError> {
        self.send_at(
            ledger,
            wallet,
            operation,
            signature,
            submitter,
            Utc::now().timestamp() as u64,
        )
    }

    /// Authorize and execute a single-recipient transfer at time `now`
    pub fn send_at<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        wallet: &Address,
        operation: &Operation,
        signature: &Signature,
        submitter: &Address,
        now: u64,
    ) -> Result<TransferRecord, WalletError> {
        let wallet = self
            .wallets
            .get(wallet)
            .ok_or(WalletError::WalletNotFound(*wallet))?
            .clone();

        let authorized_by = self
            .engine
            .authorize(&wallet, operation, signature, submitter, now)
            .into_result()?;

        if let Err(e) = execute_transfer(ledger, &wallet.address(), operation) {
            log::warn!(
                "execution failed after authorization on wallet {}; sequence {} is spent: {}",
                wallet.address(),
                operation.sequence_id,
                e
            );
            return Err(e);
        }

        let record = TransferRecord::new(wallet.address(), operation, authorized_by);
        log::info!(
            "wallet {} sent {} to {} (sequence {}, co-signed by {})",
            record.wallet,
            record.value,
            record.destination,
            record.sequence_id,
            record.authorized_by
        );
        Ok(record)
    }

    /// Authorize and execute a batch transfer at the current time
    pub fn send_batch<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        wallet: &Address,
        batch: &BatchOperation,
        signature: &Signature,
        submitter: &Address,
    ) -> Result<BatchRecord, WalletError> {
        self.send_batch_at(
            ledger,
            wallet,
            batch,
            signature,
            submitter,
            Utc::now().timestamp() as u64,
        )
    }

    /// Authorize and execute a batch transfer at time `now`
    pub fn send_batch_at<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        wallet: &Address,
        batch: &BatchOperation,
        signature: &Signature,
        submitter: &Address,
        now: u64,
    ) -> Result<BatchRecord, WalletError> {
        let wallet = self
            .wallets
            .get(wallet)
            .ok_or(WalletError::WalletNotFound(*wallet))?
            .clone();

        let authorized_by = self
            .engine
            .authorize_batch(&wallet, batch, signature, submitter, now)
            .into_result()?;

        if let Err(e) = execute_batch(ledger, &wallet.address(), batch) {
            log::warn!(
                "batch execution failed after authorization on wallet {}; sequence {} is spent: {}",
                wallet.address(),
                batch.sequence_id,
                e
            );
            return Err(e);
        }

        let record = BatchRecord::new(wallet.address(), batch, authorized_by);
        log::info!(
            "wallet {} sent batch of {} transfers (sequence {}, co-signed by {})",
            record.wallet,
            record.recipients.len(),
            record.sequence_id,
            record.authorized_by
        );
        Ok(record)
    }
}
