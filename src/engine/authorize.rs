//! Authorization pipeline
//!
//! Decides whether a proposed operation is authentic, fresh, and safe to
//! execute exactly once. Checks run in a fixed order and short-circuit:
//!
//! 1. the submitter must itself be an authorized signer
//! 2. the operation must not be expired
//! 3. the sequence id must be exactly the next expected value
//! 4. the co-signer signature over the canonical hash must recover to an
//!    authorized signer other than the submitter
//!
//! Steps 1-4 are pure. Only the final step mutates state, by irrevocably
//! consuming the sequence id. A rejection therefore never burns an id and
//! the caller may retry with the same one.

use crate::crypto::{Address, KeyError, Signature};
use crate::engine::sequence::SequenceTracker;
use crate::engine::verifier;
use crate::wallet::{BatchOperation, Operation, Wallet, WalletError};

/// Outcome of an authorization attempt
#[derive(Debug)]
pub enum AuthorizationResult {
    /// All checks passed; the sequence id is consumed
    Authorized {
        /// The co-signer whose signature authorized the operation
        by: Address,
    },
    /// A check failed; no state was changed
    Rejected(WalletError),
}

impl AuthorizationResult {
    /// Convert into a Result, surfacing the rejection reason
    pub fn into_result(self) -> Result<Address, WalletError> {
        match self {
            AuthorizationResult::Authorized { by } => Ok(by),
            AuthorizationResult::Rejected(e) => Err(e),
        }
    }
}

/// Orchestrates encode, hash, verify, sequence and expiry checks
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AuthorizationEngine {
    sequences: SequenceTracker,
}

impl AuthorizationEngine {
    /// Create an engine with no consumed sequence ids
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only query: the sequence id the wallet currently accepts
    pub fn next_sequence_id(&self, wallet: &Address) -> u64 {
        self.sequences.next_expected(wallet)
    }

    /// Authorize a single-recipient transfer at time `now` (unix seconds)
    pub fn authorize(
        &mut self,
        wallet: &Wallet,
        operation: &Operation,
        signature: &Signature,
        submitter: &Address,
        now: u64,
    ) -> AuthorizationResult {
        self.authorize_hash(
            wallet,
            operation.expiry,
            operation.sequence_id,
            &operation.hash(),
            signature,
            submitter,
            now,
        )
    }

    /// Authorize a batch transfer; same pipeline, batch-tagged hash.
    ///
    /// The parallel-list shape is a pure precondition and is checked
    /// before the pipeline runs, so a malformed batch never consumes a
    /// sequence id.
    pub fn authorize_batch(
        &mut self,
        wallet: &Wallet,
        batch: &BatchOperation,
        signature: &Signature,
        submitter: &Address,
        now: u64,
    ) -> AuthorizationResult {
        if let Err(e) = batch.validate_shape() {
            return AuthorizationResult::Rejected(e);
        }
        self.authorize_hash(
            wallet,
            batch.expiry,
            batch.sequence_id,
            &batch.hash(),
            signature,
            submitter,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn authorize_hash(
        &mut self,
        wallet: &Wallet,
        expiry: u64,
        sequence_id: u64,
        operation_hash: &[u8; 32],
        signature: &Signature,
        submitter: &Address,
        now: u64,
    ) -> AuthorizationResult {
        if !wallet.is_signer(submitter) {
            return AuthorizationResult::Rejected(WalletError::UnauthorizedSubmitter(*submitter));
        }

        if expiry <= now {
            return AuthorizationResult::Rejected(WalletError::Expired { expiry, now });
        }

        let expected = self.sequences.next_expected(&wallet.address());
        if sequence_id != expected {
            return AuthorizationResult::Rejected(WalletError::SequenceMismatch {
                got: sequence_id,
                expected,
            });
        }

        // Two distinct authorized identities are required: the submitter
        // and the co-signer, so the submitter is excluded from candidates
        let candidates: Vec<Address> = wallet
            .signers()
            .iter()
            .copied()
            .filter(|s| s != submitter)
            .collect();

        let co_signer = match verifier::verify(operation_hash, signature, &candidates) {
            Ok(Some(signer)) => signer,
            Ok(None) => return AuthorizationResult::Rejected(WalletError::BadSignature),
            Err(KeyError::MalformedSignature(msg)) => {
                return AuthorizationResult::Rejected(WalletError::MalformedSignature(msg))
            }
            Err(_) => return AuthorizationResult::Rejected(WalletError::BadSignature),
        };

        // The irrevocable commit point. Re-checked atomically so two
        // attempts with the same id yield exactly one success.
        if !self.sequences.try_consume(&wallet.address(), sequence_id) {
            return AuthorizationResult::Rejected(WalletError::SequenceMismatch {
                got: sequence_id,
                expected: self.sequences.next_expected(&wallet.address()),
            });
        }

        log::debug!(
            "authorized sequence {} on wallet {} by co-signer {}",
            sequence_id,
            wallet.address(),
            co_signer
        );

        AuthorizationResult::Authorized { by: co_signer }
    }
}
