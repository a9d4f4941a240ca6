//! Canonical operation encoding
//!
//! Deterministically serializes an operation into a fixed byte layout so
//! that every conforming implementation produces the identical operation
//! hash for the identical logical operation. The layout, in order:
//!
//! - ASCII domain tag (`COSIGN` for single transfers, `COSIGN-Batch` for
//!   batches), so a signature for one operation shape can never be
//!   replayed as the other
//! - destination address(es), each as 40 lower-case hex ASCII bytes
//! - value(s), each as a 16-byte big-endian unsigned integer in the
//!   smallest base unit
//! - payload bytes as-is (single transfers only; batches carry none)
//! - expiry timestamp as an 8-byte big-endian unix-seconds integer
//! - sequence id as an 8-byte big-endian integer
//!
//! The wallet identity is deliberately not part of the encoding: the same
//! signed operation validates against any wallet with the same co-signer
//! and sequence id. See the sequence tracker docs.

use crate::crypto::{sha256, Address};

/// Domain tag for single-recipient transfer operations
pub const TRANSFER_TAG: &str = "COSIGN";

/// Domain tag for batch transfer operations
pub const BATCH_TAG: &str = "COSIGN-Batch";

/// Encode a single-recipient transfer operation into its canonical bytes
pub fn encode_transfer(
    destination: &Address,
    value: u128,
    payload: &[u8],
    expiry: u64,
    sequence_id: u64,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(TRANSFER_TAG.len() + 40 + 16 + payload.len() + 16);
    out.extend_from_slice(TRANSFER_TAG.as_bytes());
    out.extend_from_slice(destination.to_hex().as_bytes());
    out.extend_from_slice(&value.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&expiry.to_be_bytes());
    out.extend_from_slice(&sequence_id.to_be_bytes());
    out
}

/// Encode a batch transfer operation into its canonical bytes
pub fn encode_batch(
    recipients: &[Address],
    values: &[u128],
    expiry: u64,
    sequence_id: u64,
) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(BATCH_TAG.len() + recipients.len() * 40 + values.len() * 16 + 16);
    out.extend_from_slice(BATCH_TAG.as_bytes());
    for recipient in recipients {
        out.extend_from_slice(recipient.to_hex().as_bytes());
    }
    for value in values {
        out.extend_from_slice(&value.to_be_bytes());
    }
    out.extend_from_slice(&expiry.to_be_bytes());
    out.extend_from_slice(&sequence_id.to_be_bytes());
    out
}

/// Operation hash for a single-recipient transfer (the object signed)
pub fn transfer_hash(
    destination: &Address,
    value: u128,
    payload: &[u8],
    expiry: u64,
    sequence_id: u64,
) -> [u8; 32] {
    sha256(&encode_transfer(
        destination,
        value,
        payload,
        expiry,
        sequence_id,
    ))
}

/// Operation hash for a batch transfer
pub fn batch_hash(
    recipients: &[Address],
    values: &[u128],
    expiry: u64,
    sequence_id: u64,
) -> [u8; 32] {
    sha256(&encode_batch(recipients, values, expiry, sequence_id))
}
