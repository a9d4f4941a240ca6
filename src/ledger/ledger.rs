//! Execution-environment boundary
//!
//! The engine never owns balances: they live in the hosting ledger. This
//! trait is the minimal surface the authorization engine and the batch
//! executor need from that environment. Recipients may be arbitrary code,
//! so a credit is allowed to fail.

use crate::crypto::Address;
use crate::wallet::WalletError;

/// Balance store owned by the hosting execution environment
pub trait Ledger {
    /// Current balance of an address, in the smallest base unit
    fn balance(&self, address: &Address) -> u128;

    /// Credit value to an address.
    ///
    /// Fails with `RecipientTransferFailed` when the recipient rejects the
    /// payment or is unreachable.
    fn credit(&mut self, address: &Address, value: u128) -> Result<(), WalletError>;

    /// Debit value from an address.
    ///
    /// Fails with `InsufficientFunds` when the balance does not cover it.
    fn debit(&mut self, address: &Address, value: u128) -> Result<(), WalletError>;
}
