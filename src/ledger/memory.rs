//! In-memory ledger
//!
//! Backs the CLI and the test suite. Recipients can be marked as
//! rejecting to model adversarial or unreachable recipient code.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::crypto::Address;
use crate::ledger::ledger::Ledger;
use crate::wallet::WalletError;

/// HashMap-backed ledger implementation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: HashMap<Address, u128>,
    #[serde(default)]
    rejecting: HashSet<Address>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit value into an address, bypassing recipient checks
    /// (models an inbound payment from outside the engine)
    pub fn deposit(&mut self, address: &Address, value: u128) -> Result<(), WalletError> {
        let balance = self.balances.entry(*address).or_insert(0);
        *balance = balance
            .checked_add(value)
            .ok_or(WalletError::ValueOverflow)?;
        Ok(())
    }

    /// Mark an address as rejecting all incoming transfers
    pub fn set_rejecting(&mut self, address: &Address, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(*address);
        } else {
            self.rejecting.remove(address);
        }
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, address: &Address) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    fn credit(&mut self, address: &Address, value: u128) -> Result<(), WalletError> {
        if self.rejecting.contains(address) {
            return Err(WalletError::RecipientTransferFailed(*address));
        }
        let balance = self.balances.entry(*address).or_insert(0);
        *balance = balance
            .checked_add(value)
            .ok_or(WalletError::ValueOverflow)?;
        Ok(())
    }

    fn debit(&mut self, address: &Address, value: u128) -> Result<(), WalletError> {
        let balance = self.balances.entry(*address).or_insert(0);
        if *balance < value {
            return Err(WalletError::InsufficientFunds {
                needed: value,
                available: *balance,
            });
        }
        *balance -= value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    fn addr() -> Address {
        KeyPair::generate().address()
    }

    #[test]
    fn test_deposit_and_balance() {
        let mut ledger = MemoryLedger::new();
        let a = addr();
        assert_eq!(ledger.balance(&a), 0);

        ledger.deposit(&a, 100).unwrap();
        assert_eq!(ledger.balance(&a), 100);
    }

    #[test]
    fn test_deposit_overflow() {
        let mut ledger = MemoryLedger::new();
        let a = addr();
        ledger.deposit(&a, u128::MAX).unwrap();

        let err = ledger.deposit(&a, 1).unwrap_err();
        assert!(matches!(err, WalletError::ValueOverflow));
        assert_eq!(ledger.balance(&a), u128::MAX);
    }

    #[test]
    fn test_credit_and_debit() {
        let mut ledger = MemoryLedger::new();
        let a = addr();

        ledger.credit(&a, 50).unwrap();
        assert_eq!(ledger.balance(&a), 50);

        ledger.debit(&a, 30).unwrap();
        assert_eq!(ledger.balance(&a), 20);
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let mut ledger = MemoryLedger::new();
        let a = addr();
        ledger.deposit(&a, 10).unwrap();

        let err = ledger.debit(&a, 11).unwrap_err();
        assert!(matches!(err, WalletError::InsufficientFunds { .. }));
        assert_eq!(ledger.balance(&a), 10);
    }

    #[test]
    fn test_rejecting_recipient() {
        let mut ledger = MemoryLedger::new();
        let a = addr();
        ledger.set_rejecting(&a, true);

        let err = ledger.credit(&a, 5).unwrap_err();
        assert!(matches!(err, WalletError::RecipientTransferFailed(_)));

        ledger.set_rejecting(&a, false);
        assert!(ledger.credit(&a, 5).is_ok());
    }
}
