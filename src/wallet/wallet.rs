//! Co-signed wallet identity and signer set
//!
//! A wallet is an address plus a fixed set of authorized signers. Spending
//! always requires two distinct authorized identities: the submitter and a
//! co-signer whose signature covers the operation hash.

use chrono::{DateTime, Utc};
use ripemd::{Digest, Ripemd160};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{sha256, Address, KeyError};

/// Errors produced by the authorization and execution pipeline
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Submitter {0} is not an authorized signer")]
    UnauthorizedSubmitter(Address),
    #[error("Operation expired at {expiry}, current time is {now}")]
    Expired { expiry: u64, now: u64 },
    #[error("Sequence id mismatch: got {got}, expected {expected}")]
    SequenceMismatch { got: u64, expected: u64 },
    #[error("Signature does not recover to a distinct authorized co-signer")]
    BadSignature,
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    #[error("Batch lists must have equal non-zero length: {recipients} recipients, {values} values")]
    BatchLengthMismatch { recipients: usize, values: usize },
    #[error("Insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },
    #[error("Transfer to recipient {0} failed")]
    RecipientTransferFailed(Address),
    #[error("Batch value total overflows")]
    ValueOverflow,
    #[error("Wallet not found: {0}")]
    WalletNotFound(Address),
    #[error("Need at least 2 authorized signers")]
    InsufficientSigners,
    #[error("Duplicate signer in the authorized set")]
    DuplicateSigner,
    #[error("Crypto error: {0}")]
    CryptoError(#[from] KeyError),
}

impl WalletError {
    /// Whether this error occurred before sequence consumption.
    ///
    /// Authorization-phase failures leave all state untouched, so the same
    /// sequence id can back a fresh attempt. Execution-phase failures occur
    /// after consumption and permanently burn the id.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            WalletError::UnauthorizedSubmitter(_)
                | WalletError::Expired { .. }
                | WalletError::SequenceMismatch { .. }
                | WalletError::BadSignature
                | WalletError::MalformedSignature(_)
                | WalletError::BatchLengthMismatch { .. }
        )
    }
}

/// A co-signed wallet with a fixed authorized signer set
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet identity, derived from the sorted signer set
    pub address: Address,
    /// Authorized signers (immutable after creation, size >= 2)
    signers: Vec<Address>,
    /// Optional human-readable label
    pub label: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet from its authorized signer set
    ///
    /// # Errors
    /// Returns an error if fewer than 2 signers are supplied or the set
    /// contains duplicates.
    pub fn new(signers: Vec<Address>, label: Option<String>) -> Result<Self, WalletError> {
        if signers.len() < 2 {
            return Err(WalletError::InsufficientSigners);
        }

        let mut sorted = signers.clone();
        sorted.sort();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(WalletError::DuplicateSigner);
        }

        let address = Self::derive_address(&sorted);

        Ok(Self {
            address,
            signers,
            label,
            created_at: Utc::now(),
        })
    }

    /// Derive a deterministic wallet address from the sorted signer set:
    /// `RIPEMD160(SHA256(signer_1 || signer_2 || ...))`
    fn derive_address(sorted_signers: &[Address]) -> Address {
        let mut data = Vec::with_capacity(sorted_signers.len() * 20);
        for signer in sorted_signers {
            data.extend_from_slice(signer.as_bytes());
        }
        let sha = sha256(&data);
        let mut ripemd = Ripemd160::new();
        ripemd.update(sha);
        Address::from_bytes(ripemd.finalize().into())
    }

    /// Get the wallet address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Check whether an address is in the authorized signer set
    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    /// The authorized signer set
    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    /// Number of authorized signers
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }
}
