//! Cosign-Wallet: a multi-party authorization and replay-protection engine
//!
//! Decides whether a proposed fund transfer is authentic, fresh, and safe
//! to execute exactly once. Features:
//! - Canonical, deterministic operation encoding with domain separation
//!   between single and batch transfer shapes
//! - Recoverable ECDSA (secp256k1) co-signer verification against a fixed
//!   authorized signer set
//! - Strict-next, per-wallet sequence tracking for single-use operations
//! - Expiry enforcement on every operation
//! - All-or-nothing multi-recipient execution with a rollback/commit scope
//! - An untrusted external forwarder modeled at the trust boundary
//! - JSON persistence for wallet and sequence state
//!
//! # Example
//!
//! ```rust
//! use cosign_wallet::crypto::KeyPair;
//! use cosign_wallet::ledger::MemoryLedger;
//! use cosign_wallet::wallet::{Operation, WalletManager};
//!
//! let submitter = KeyPair::generate();
//! let co_signer = KeyPair::generate();
//!
//! let mut manager = WalletManager::new();
//! let wallet = manager
//!     .create_wallet(vec![submitter.address(), co_signer.address()], None)
//!     .unwrap();
//!
//! let mut ledger = MemoryLedger::new();
//! ledger.deposit(&wallet.address(), 1_000).unwrap();
//!
//! let operation = Operation {
//!     destination: KeyPair::generate().address(),
//!     value: 100,
//!     payload: vec![],
//!     expiry: 4_000_000_000,
//!     sequence_id: manager.next_sequence_id(&wallet.address()).unwrap(),
//! };
//!
//! // The co-signer signs the operation hash off-engine
//! let signature = co_signer.sign_recoverable(&operation.hash()).unwrap();
//!
//! let record = manager
//!     .send(&mut ledger, &wallet.address(), &operation, &signature,
//!           &submitter.address())
//!     .unwrap();
//! assert_eq!(record.authorized_by, co_signer.address());
//! ```

pub mod cli;
pub mod crypto;
pub mod encoding;
pub mod engine;
pub mod forwarder;
pub mod ledger;
pub mod storage;
pub mod wallet;

// Re-export commonly used types
pub use crypto::{Address, KeyPair, Signature};
pub use engine::{AuthorizationEngine, AuthorizationResult, SequenceTracker};
pub use forwarder::Forwarder;
pub use ledger::{Ledger, LedgerTransaction, MemoryLedger};
pub use storage::{Storage, StorageConfig};
pub use wallet::{
    BatchOperation, BatchRecord, Operation, TransferRecord, Wallet, WalletError, WalletManager,
};
