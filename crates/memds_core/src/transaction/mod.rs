//! Single-statement transactions.
//!
//! A transaction stages puts and deletes in a private overlay. Commit
//! applies the whole overlay to the committed store in one step; rollback
//! drops it. Reads never consult an overlay, so a transaction does not
//! see its own uncommitted writes.

mod manager;
mod state;

pub use manager::TransactionManager;
pub use state::{PendingWrite, Transaction};
