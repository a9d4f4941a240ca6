//! Transfer operations and audit records
//!
//! Operations are immutable once constructed and consumed at most once:
//! sequence id consumption is the irrevocable transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{sha256_hex, Address};
use crate::encoding::{batch_hash, transfer_hash};
use crate::wallet::wallet::WalletError;

/// A proposed single-recipient transfer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Recipient identity
    pub destination: Address,
    /// Value in the smallest base unit
    pub value: u128,
    /// Opaque payload bytes (may be empty)
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,
    /// Absolute expiry timestamp, unix seconds
    pub expiry: u64,
    /// Per-wallet sequence id
    pub sequence_id: u64,
}

impl Operation {
    /// The canonical operation hash (the object co-signers sign)
    pub fn hash(&self) -> [u8; 32] {
        transfer_hash(
            &self.destination,
            self.value,
            &self.payload,
            self.expiry,
            self.sequence_id,
        )
    }
}

/// A proposed multi-recipient transfer with all-or-nothing delivery
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperation {
    /// Recipient identities, in delivery order
    pub recipients: Vec<Address>,
    /// Values, parallel to `recipients`
    pub values: Vec<u128>,
    /// Absolute expiry timestamp, unix seconds
    pub expiry: u64,
    /// Per-wallet sequence id
    pub sequence_id: u64,
}

impl BatchOperation {
    /// The canonical operation hash
    pub fn hash(&self) -> [u8; 32] {
        batch_hash(&self.recipients, &self.values, self.expiry, self.sequence_id)
    }

    /// Check the parallel lists are of equal, non-zero length
    pub fn validate_shape(&self) -> Result<(), WalletError> {
        if self.recipients.is_empty() || self.recipients.len() != self.values.len() {
            return Err(WalletError::BatchLengthMismatch {
                recipients: self.recipients.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    /// Overflow-checked total value of the batch
    pub fn total_value(&self) -> Result<u128, WalletError> {
        self.values
            .iter()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
            .ok_or(WalletError::ValueOverflow)
    }
}

/// Auditable record emitted after a successful authorize-and-send
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Wallet the funds left
    pub wallet: Address,
    /// Recipient
    pub destination: Address,
    /// Value transferred
    pub value: u128,
    /// SHA-256 of the payload bytes, hex
    pub payload_hash: String,
    /// Consumed sequence id
    pub sequence_id: u64,
    /// Co-signer whose signature authorized the operation
    pub authorized_by: Address,
    /// Execution timestamp
    pub executed_at: DateTime<Utc>,
}

impl TransferRecord {
    pub fn new(wallet: Address, operation: &Operation, authorized_by: Address) -> Self {
        Self {
            wallet,
            destination: operation.destination,
            value: operation.value,
            payload_hash: sha256_hex(&operation.payload),
            sequence_id: operation.sequence_id,
            authorized_by,
            executed_at: Utc::now(),
        }
    }
}

/// Auditable record emitted after a successful batch send
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchRecord {
    pub wallet: Address,
    pub recipients: Vec<Address>,
    pub values: Vec<u128>,
    pub sequence_id: u64,
    pub authorized_by: Address,
    pub executed_at: DateTime<Utc>,
}

impl BatchRecord {
    pub fn new(wallet: Address, batch: &BatchOperation, authorized_by: Address) -> Self {
        Self {
            wallet,
            recipients: batch.recipients.clone(),
            values: batch.values.clone(),
            sequence_id: batch.sequence_id,
            authorized_by,
            executed_at: Utc::now(),
        }
    }
}

/// Serde helper: payload bytes as a hex string
mod hex_bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(D::Error::custom)
    }
}
