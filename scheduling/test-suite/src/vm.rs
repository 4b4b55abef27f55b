use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use pexec_core_types::Transaction;
use pexec_scheduling_scheduler::{TxResult, VmInterface};

use crate::TestTx;

/// A VM double that records call order and injects failures per transaction index.
///
/// Injections are counted: `with_failing_execution(i, 1)` fails the parallel attempt and lets
/// the serial rerun succeed, while a count of 2 also fails the rerun and turns the conflict
/// fatal. Execution and confirmation orders are recorded for assertions.
#[derive(Clone, Default)]
pub struct TestVm {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    fail_execute: Mutex<HashMap<usize, usize>>,
    fail_confirm: Mutex<HashMap<usize, usize>>,
    executed: Mutex<Vec<usize>>,
    confirmed: Mutex<Vec<usize>>,
}

impl TestVm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` executions of `tx_index` fail.
    pub fn with_failing_execution(self, tx_index: usize, count: usize) -> Self {
        self.inner.fail_execute.lock().insert(tx_index, count);
        self
    }

    /// Makes the next `count` confirmations of `tx_index` fail.
    pub fn with_failing_confirmation(self, tx_index: usize, count: usize) -> Self {
        self.inner.fail_confirm.lock().insert(tx_index, count);
        self
    }

    /// Indices in execution order; reruns appear as repeated entries.
    pub fn executed(&self) -> Vec<usize> {
        self.inner.executed.lock().clone()
    }

    /// Indices in confirmation order; failed attempts appear as repeated entries.
    pub fn confirmed(&self) -> Vec<usize> {
        self.inner.confirmed.lock().clone()
    }

    /// How many times `tx_index` has been executed.
    pub fn execution_count(&self, tx_index: usize) -> usize {
        self.inner.executed.lock().iter().filter(|&&i| i == tx_index).count()
    }
}

fn take_failure(failures: &Mutex<HashMap<usize, usize>>, index: usize) -> bool {
    let mut failures = failures.lock();
    match failures.get_mut(&index) {
        Some(remaining) => {
            *remaining -= 1;
            if *remaining == 0 {
                failures.remove(&index);
            }
            true
        }
        None => false,
    }
}

impl VmInterface for TestVm {
    fn execute_transaction(&self, tx: &TestTx) -> Result<(), String> {
        let index = tx.tx_index();
        self.inner.executed.lock().push(index);
        if take_failure(&self.inner.fail_execute, index) {
            return Err(format!("injected execution conflict on tx {index}"));
        }
        Ok(())
    }

    fn confirm_transaction(&self, result: &TxResult<Self>) -> Result<(), String> {
        let index = result.tx_index();
        self.inner.confirmed.lock().push(index);
        if take_failure(&self.inner.fail_confirm, index) {
            return Err(format!("injected confirmation conflict on tx {index}"));
        }
        Ok(())
    }

    type Transaction = TestTx;
    type Effects = ();
    type Error = String;
}
