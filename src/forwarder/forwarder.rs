//! External payment forwarder (untrusted collaborator)
//!
//! Splits a single inbound payment across a recipient list. This helper
//! sits outside the trusted core and the engine assumes nothing about it:
//! it performs no check that the inbound payment equals the declared sum,
//! it is not authenticated, and any surplus stays on its own balance
//! where a later caller can claim it with a recipient list of their
//! choosing. Designs built on it must not rely on its balance being zero
//! between calls.

use crate::crypto::Address;
use crate::ledger::{Ledger, LedgerTransaction};
use crate::wallet::WalletError;

/// Unauthenticated multi-recipient payment splitter
#[derive(Debug, Clone)]
pub struct Forwarder {
    address: Address,
}

impl Forwarder {
    /// Create a forwarder that keeps its balance at `address`
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// The forwarder's own ledger address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Funds currently held by the forwarder
    pub fn held_balance<L: Ledger + ?Sized>(&self, ledger: &L) -> u128 {
        ledger.balance(&self.address)
    }

    /// Forward `attached` value from `caller` across the recipient list.
    ///
    /// Pays recipients from the forwarder's entire balance, including any
    /// surplus left by earlier callers. A mid-list failure reverts the
    /// whole call; a successful call keeps whatever was not paid out.
    pub fn batch<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: &Address,
        recipients: &[Address],
        values: &[u128],
        attached: u128,
    ) -> Result<(), WalletError> {
        if recipients.is_empty() || recipients.len() != values.len() {
            return Err(WalletError::BatchLengthMismatch {
                recipients: recipients.len(),
                values: values.len(),
            });
        }

        let mut tx = LedgerTransaction::new(ledger);
        if attached > 0 {
            tx.debit(caller, attached)?;
            tx.credit(&self.address, attached)?;
        }

        for (recipient, value) in recipients.iter().zip(values) {
            tx.debit(&self.address, *value)?;
            tx.credit(recipient, *value)?;
        }
        tx.commit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::ledger::MemoryLedger;

    fn addr() -> Address {
        KeyPair::generate().address()
    }

    #[test]
    fn test_exact_split_leaves_nothing() {
        let mut ledger = MemoryLedger::new();
        let forwarder = Forwarder::new(addr());
        let caller = addr();
        let (r1, r2) = (addr(), addr());
        ledger.deposit(&caller, 10).unwrap();

        forwarder
            .batch(&mut ledger, &caller, &[r1, r2], &[4, 6], 10)
            .unwrap();

        assert_eq!(ledger.balance(&r1), 4);
        assert_eq!(ledger.balance(&r2), 6);
        assert_eq!(forwarder.held_balance(&ledger), 0);
    }

    #[test]
    fn test_surplus_remains_claimable_by_anyone() {
        let mut ledger = MemoryLedger::new();
        let forwarder = Forwarder::new(addr());
        let caller = addr();
        let recipients: Vec<Address> = (0..5).map(|_| addr()).collect();
        let values = [1u128, 1, 1, 1, 1];
        ledger.deposit(&caller, 10).unwrap();

        // Total attached (10) exceeds the declared sum (5); the surplus
        // is not refunded, it accrues to the forwarder
        forwarder
            .batch(&mut ledger, &caller, &recipients, &values, 10)
            .unwrap();
        assert_eq!(forwarder.held_balance(&ledger), 5);

        // A second, unauthenticated caller drains it with zero attached
        let attacker = addr();
        let attacker_sink = addr();
        forwarder
            .batch(&mut ledger, &attacker, &[attacker_sink], &[5], 0)
            .unwrap();

        assert_eq!(ledger.balance(&attacker_sink), 5);
        assert_eq!(forwarder.held_balance(&ledger), 0);
    }

    #[test]
    fn test_reverts_whole_call_on_recipient_failure() {
        let mut ledger = MemoryLedger::new();
        let forwarder = Forwarder::new(addr());
        let caller = addr();
        let (r1, r2) = (addr(), addr());
        ledger.deposit(&caller, 10).unwrap();
        ledger.set_rejecting(&r2, true);

        let err = forwarder
            .batch(&mut ledger, &caller, &[r1, r2], &[4, 6], 10)
            .unwrap_err();
        assert!(matches!(err, WalletError::RecipientTransferFailed(_)));

        assert_eq!(ledger.balance(&caller), 10);
        assert_eq!(ledger.balance(&r1), 0);
        assert_eq!(forwarder.held_balance(&ledger), 0);
    }

    #[test]
    fn test_insufficient_forwarded_budget() {
        let mut ledger = MemoryLedger::new();
        let forwarder = Forwarder::new(addr());
        let caller = addr();
        ledger.deposit(&caller, 3).unwrap();

        // Declared values exceed attached + held balance
        let err = forwarder
            .batch(&mut ledger, &caller, &[addr(), addr()], &[2, 3], 3)
            .unwrap_err();
        assert!(matches!(err, WalletError::InsufficientFunds { .. }));
        assert_eq!(ledger.balance(&caller), 3);
    }

    #[test]
    fn test_rejects_mismatched_lists() {
        let mut ledger = MemoryLedger::new();
        let forwarder = Forwarder::new(addr());
        let caller = addr();

        let err = forwarder
            .batch(&mut ledger, &caller, &[addr()], &[1, 2], 3)
            .unwrap_err();
        assert!(matches!(err, WalletError::BatchLengthMismatch { .. }));
    }
}
