//! Co-signed wallets, transfer operations, and the authorize-and-send
//! interface
//!
//! # Example
//!
//! ```ignore
//! use cosign_wallet::wallet::{Operation, WalletManager};
//!
//! // Create a wallet with three authorized signers
//! let wallet = manager.create_wallet(vec![a, b, c], None)?;
//!
//! // One signer submits, a second co-signs the operation hash
//! let signature = co_signer_keys.sign_recoverable(&operation.hash())?;
//! let record = manager.send(&mut ledger, &wallet.address(), &operation,
//!                           &signature, &submitter)?;
//! ```

pub mod manager;
pub mod operation;
pub mod wallet;

pub use manager::WalletManager;
pub use operation::{BatchOperation, BatchRecord, Operation, TransferRecord};
pub use wallet::{Wallet, WalletError};
