//! Balance ledger boundary: trait, in-memory implementation, and the
//! rollback/commit transaction scope

pub mod ledger;
pub mod memory;
pub mod transaction;

pub use ledger::Ledger;
pub use memory::MemoryLedger;
pub use transaction::LedgerTransaction;
