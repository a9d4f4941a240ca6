//! Scoped rollback/commit boundary over a ledger
//!
//! Multi-step transfers must be all-or-nothing: a partially delivered
//! batch is irrecoverable, since the caller cannot retry without paying
//! already-reached recipients twice. Every applied entry is journaled;
//! dropping the transaction without committing replays the journal in
//! reverse, restoring the pre-transaction balances.

use crate::crypto::Address;
use crate::ledger::ledger::Ledger;
use crate::wallet::WalletError;

enum JournalEntry {
    Credited(Address, u128),
    Debited(Address, u128),
}

/// An in-flight, revertable sequence of ledger mutations
pub struct LedgerTransaction<'a, L: Ledger + ?Sized> {
    ledger: &'a mut L,
    journal: Vec<JournalEntry>,
    committed: bool,
}

impl<'a, L: Ledger + ?Sized> LedgerTransaction<'a, L> {
    /// Open a transaction over the ledger
    pub fn new(ledger: &'a mut L) -> Self {
        Self {
            ledger,
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Credit within the transaction; journaled for rollback
    pub fn credit(&mut self, address: &Address, value: u128) -> Result<(), WalletError> {
        self.ledger.credit(address, value)?;
        self.journal.push(JournalEntry::Credited(*address, value));
        Ok(())
    }

    /// Debit within the transaction; journaled for rollback
    pub fn debit(&mut self, address: &Address, value: u128) -> Result<(), WalletError> {
        self.ledger.debit(address, value)?;
        self.journal.push(JournalEntry::Debited(*address, value));
        Ok(())
    }

    /// Make every journaled mutation permanent
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<L: Ledger + ?Sized> Drop for LedgerTransaction<'_, L> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for entry in self.journal.drain(..).rev() {
            let result = match entry {
                JournalEntry::Credited(address, value) => self.ledger.debit(&address, value),
                JournalEntry::Debited(address, value) => self.ledger.credit(&address, value),
            };
            if let Err(e) = result {
                // A journaled entry applied once, so its inverse must apply
                log::error!("ledger rollback entry failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::ledger::memory::MemoryLedger;

    fn addr() -> Address {
        KeyPair::generate().address()
    }

    #[test]
    fn test_commit_keeps_mutations() {
        let mut ledger = MemoryLedger::new();
        let (a, b) = (addr(), addr());
        ledger.deposit(&a, 100).unwrap();

        let mut tx = LedgerTransaction::new(&mut ledger);
        tx.debit(&a, 40).unwrap();
        tx.credit(&b, 40).unwrap();
        tx.commit();

        assert_eq!(ledger.balance(&a), 60);
        assert_eq!(ledger.balance(&b), 40);
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let mut ledger = MemoryLedger::new();
        let (a, b) = (addr(), addr());
        ledger.deposit(&a, 100).unwrap();

        {
            let mut tx = LedgerTransaction::new(&mut ledger);
            tx.debit(&a, 40).unwrap();
            tx.credit(&b, 40).unwrap();
            // dropped here without commit
        }

        assert_eq!(ledger.balance(&a), 100);
        assert_eq!(ledger.balance(&b), 0);
    }

    #[test]
    fn test_failed_entry_is_not_journaled() {
        let mut ledger = MemoryLedger::new();
        let (a, rejecting) = (addr(), addr());
        ledger.deposit(&a, 100).unwrap();
        ledger.set_rejecting(&rejecting, true);

        {
            let mut tx = LedgerTransaction::new(&mut ledger);
            tx.debit(&a, 40).unwrap();
            assert!(tx.credit(&rejecting, 40).is_err());
        }

        // Only the debit was journaled and it was rolled back
        assert_eq!(ledger.balance(&a), 100);
        assert_eq!(ledger.balance(&rejecting), 0);
    }
}
