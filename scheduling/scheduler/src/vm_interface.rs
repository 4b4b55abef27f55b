use pexec_core_types::Transaction;

use crate::TxResult;

/// The state-transition engine the scheduler drives.
///
/// Implementations own all VM semantics, state access, and commit logic; the scheduler only
/// decides when, in what order, and on which thread each call happens.
pub trait VmInterface: Clone + Sized + Send + Sync + 'static {
    /// Executes a transaction in the parallel phase.
    ///
    /// Called concurrently from worker threads. An `Err` is the normal conflict signal
    /// (typically a stale state read) and triggers a serial re-execution at confirmation time;
    /// on its own it is never fatal for the block.
    fn execute_transaction(&self, tx: &Self::Transaction) -> Result<Self::Effects, Self::Error>;

    /// Confirms an executed transaction against canonical state.
    ///
    /// Invoked from a single thread, level by level, ascending in `tx_index` within each
    /// level. An `Err` means "conflict, re-execute this transaction"; only an error bubbling
    /// out of the rerun path is fatal.
    fn confirm_transaction(&self, result: &TxResult<Self>) -> Result<(), Self::Error>;

    type Transaction: Transaction;
    type Effects: Send + Sync + 'static;
    type Error: std::fmt::Debug + Send + Sync + 'static;
}
