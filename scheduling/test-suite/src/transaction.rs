use std::sync::Arc;

use pexec_core_types::Transaction;

/// A minimal transaction carrying exactly what the scheduler inspects.
pub struct TestTx {
    index: usize,
    sender: u64,
    recipient: Option<u64>,
}

impl TestTx {
    pub fn new(index: usize, sender: u64, recipient: Option<u64>) -> Arc<Self> {
        Arc::new(Self { index, sender, recipient })
    }

    /// A transaction touching accounts nothing else in the block touches.
    pub fn independent(index: usize) -> Arc<Self> {
        Self::new(index, 1_000 + index as u64, None)
    }

    /// A block of `count` mutually independent transactions.
    pub fn independent_block(count: usize) -> Vec<Arc<Self>> {
        (0..count).map(Self::independent).collect()
    }
}

impl Transaction for TestTx {
    fn tx_index(&self) -> usize {
        self.index
    }

    fn sender(&self) -> u64 {
        self.sender
    }

    fn recipient(&self) -> Option<u64> {
        self.recipient
    }

    type AccountId = u64;
}
