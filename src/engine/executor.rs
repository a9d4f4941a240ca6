//! Transfer execution against the ledger
//!
//! Runs strictly after authorization. Batches deliver in list order
//! inside a rollback/commit scope: if any recipient fails, every prior
//! credit and the wallet debit are reverted, so the wallet balance
//! reflects zero net transfer. Partial delivery is never observable.

use crate::crypto::Address;
use crate::ledger::{Ledger, LedgerTransaction};
use crate::wallet::{BatchOperation, Operation, WalletError};

/// Execute an authorized single-recipient transfer
pub fn execute_transfer<L: Ledger + ?Sized>(
    ledger: &mut L,
    wallet: &Address,
    operation: &Operation,
) -> Result<(), WalletError> {
    let available = ledger.balance(wallet);
    if available < operation.value {
        return Err(WalletError::InsufficientFunds {
            needed: operation.value,
            available,
        });
    }

    let mut tx = LedgerTransaction::new(ledger);
    tx.debit(wallet, operation.value)?;
    tx.credit(&operation.destination, operation.value)?;
    tx.commit();
    Ok(())
}

/// Execute an authorized batch transfer with all-or-nothing semantics
pub fn execute_batch<L: Ledger + ?Sized>(
    ledger: &mut L,
    wallet: &Address,
    batch: &BatchOperation,
) -> Result<(), WalletError> {
    batch.validate_shape()?;

    let total = batch.total_value()?;
    let available = ledger.balance(wallet);
    if available < total {
        return Err(WalletError::InsufficientFunds {
            needed: total,
            available,
        });
    }

    let mut tx = LedgerTransaction::new(ledger);
    tx.debit(wallet, total)?;
    for (recipient, value) in batch.recipients.iter().zip(&batch.values) {
        // Any failure drops the transaction scope, rolling back the
        // debit and every credit already delivered
        tx.credit(recipient, *value)?;
    }
    tx.commit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::ledger::MemoryLedger;

    fn addr() -> Address {
        KeyPair::generate().address()
    }

    fn batch(recipients: Vec<Address>, values: Vec<u128>) -> BatchOperation {
        BatchOperation {
            recipients,
            values,
            expiry: 2_000_000_000,
            sequence_id: 1,
        }
    }

    #[test]
    fn test_single_transfer() {
        let mut ledger = MemoryLedger::new();
        let (wallet, dest) = (addr(), addr());
        ledger.deposit(&wallet, 100).unwrap();

        let op = Operation {
            destination: dest,
            value: 40,
            payload: vec![],
            expiry: 2_000_000_000,
            sequence_id: 1,
        };
        execute_transfer(&mut ledger, &wallet, &op).unwrap();

        assert_eq!(ledger.balance(&wallet), 60);
        assert_eq!(ledger.balance(&dest), 40);
    }

    #[test]
    fn test_single_transfer_to_rejecting_recipient_rolls_back() {
        let mut ledger = MemoryLedger::new();
        let (wallet, dest) = (addr(), addr());
        ledger.deposit(&wallet, 100).unwrap();
        ledger.set_rejecting(&dest, true);

        let op = Operation {
            destination: dest,
            value: 40,
            payload: vec![],
            expiry: 2_000_000_000,
            sequence_id: 1,
        };
        let err = execute_transfer(&mut ledger, &wallet, &op).unwrap_err();
        assert!(matches!(err, WalletError::RecipientTransferFailed(_)));
        assert_eq!(ledger.balance(&wallet), 100);
    }

    #[test]
    fn test_batch_delivers_in_order() {
        let mut ledger = MemoryLedger::new();
        let wallet = addr();
        let (r1, r2) = (addr(), addr());
        ledger.deposit(&wallet, 10).unwrap();

        execute_batch(&mut ledger, &wallet, &batch(vec![r1, r2], vec![2, 3])).unwrap();

        assert_eq!(ledger.balance(&wallet), 5);
        assert_eq!(ledger.balance(&r1), 2);
        assert_eq!(ledger.balance(&r2), 3);
    }

    #[test]
    fn test_batch_length_mismatch() {
        let mut ledger = MemoryLedger::new();
        let wallet = addr();
        ledger.deposit(&wallet, 10).unwrap();

        let err = execute_batch(&mut ledger, &wallet, &batch(vec![addr()], vec![2, 3]))
            .unwrap_err();
        assert!(matches!(err, WalletError::BatchLengthMismatch { .. }));

        let err = execute_batch(&mut ledger, &wallet, &batch(vec![], vec![])).unwrap_err();
        assert!(matches!(err, WalletError::BatchLengthMismatch { .. }));
    }

    #[test]
    fn test_batch_insufficient_funds() {
        let mut ledger = MemoryLedger::new();
        let wallet = addr();
        ledger.deposit(&wallet, 4).unwrap();

        let err = execute_batch(&mut ledger, &wallet, &batch(vec![addr(), addr()], vec![2, 3]))
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientFunds {
                needed: 5,
                available: 4
            }
        ));
        assert_eq!(ledger.balance(&wallet), 4);
    }

    #[test]
    fn test_batch_rolls_back_on_late_recipient_failure() {
        let mut ledger = MemoryLedger::new();
        let wallet = addr();
        let (r1, r2) = (addr(), addr());
        ledger.deposit(&wallet, 10).unwrap();
        ledger.set_rejecting(&r2, true);

        let err = execute_batch(&mut ledger, &wallet, &batch(vec![r1, r2], vec![2, 3]))
            .unwrap_err();
        assert!(matches!(err, WalletError::RecipientTransferFailed(a) if a == r2));

        // Zero net transfer: r1's tentative credit was returned too
        assert_eq!(ledger.balance(&wallet), 10);
        assert_eq!(ledger.balance(&r1), 0);
        assert_eq!(ledger.balance(&r2), 0);
    }

    #[test]
    fn test_batch_total_overflow_checked_before_any_transfer() {
        let mut ledger = MemoryLedger::new();
        let wallet = addr();
        ledger.deposit(&wallet, 10).unwrap();

        let err = execute_batch(
            &mut ledger,
            &wallet,
            &batch(vec![addr(), addr()], vec![u128::MAX, 1]),
        )
        .unwrap_err();
        assert!(matches!(err, WalletError::ValueOverflow));
        assert_eq!(ledger.balance(&wallet), 10);
    }
}
