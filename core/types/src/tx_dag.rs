use std::collections::HashMap;

use crate::TxDep;

/// Dependency graph over the transaction indices of a single block.
///
/// The scheduler only ever reads a DAG it is handed; writes happen through the predictor into a
/// caller-provided instance.
pub trait TxDag {
    /// Returns the dependency record for `tx_index`, if one exists.
    fn tx_dep(&self, tx_index: usize) -> Option<&TxDep>;

    /// Records the dependency entry for `tx_index`, replacing any previous one.
    fn set_tx_dep(&mut self, tx_index: usize, dep: TxDep);
}

/// Map-backed [`TxDag`] implementation.
#[derive(Clone, Debug, Default)]
pub struct PlainTxDag {
    deps: HashMap<usize, TxDep>,
}

impl PlainTxDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions with a recorded dependency entry.
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

impl TxDag for PlainTxDag {
    fn tx_dep(&self, tx_index: usize) -> Option<&TxDep> {
        self.deps.get(&tx_index)
    }

    fn set_tx_dep(&mut self, tx_index: usize, dep: TxDep) {
        self.deps.insert(tx_index, dep);
    }
}
