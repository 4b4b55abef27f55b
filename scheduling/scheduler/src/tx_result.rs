use std::sync::Arc;

use pexec_core_types::Transaction;

use crate::VmInterface;

/// Output of a single `execute_transaction` call, tied back to its originating request.
///
/// The effects payload is opaque to the scheduler and forwarded to confirmation as-is; an
/// `Err` outcome marks a parallel-phase conflict awaiting serial re-execution.
pub struct TxResult<V: VmInterface> {
    request: Arc<V::Transaction>,
    outcome: Result<V::Effects, V::Error>,
}

impl<V: VmInterface> TxResult<V> {
    pub(crate) fn new(request: Arc<V::Transaction>, outcome: Result<V::Effects, V::Error>) -> Self {
        Self { request, outcome }
    }

    /// The request this result was produced from.
    pub fn request(&self) -> &Arc<V::Transaction> {
        &self.request
    }

    /// Position of the originating transaction within its block.
    pub fn tx_index(&self) -> usize {
        self.request.tx_index()
    }

    /// The state effects, if parallel execution succeeded.
    pub fn effects(&self) -> Option<&V::Effects> {
        self.outcome.as_ref().ok()
    }

    /// The execution error, if parallel execution failed.
    pub fn exec_err(&self) -> Option<&V::Error> {
        self.outcome.as_ref().err()
    }
}
