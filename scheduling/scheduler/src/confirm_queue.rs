use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use parking_lot::Mutex;
use pexec_core_types::Transaction;

use crate::{ScheduleError, TxLevel, TxResult, VmInterface};

/// Per-block landing area for parallel execution results, drained in block order.
///
/// Workers deposit results at their transaction's index; the driver thread then walks the
/// queue, confirming each transaction in ascending order and re-executing serially on
/// conflict. Slots are individually locked: each index is written by exactly one worker per
/// level, so the locks are uncontended and exist to publish the write to the draining thread.
pub(crate) struct ConfirmQueue<V: VmInterface> {
    /// One slot per `tx_index`; empty until the parallel phase deposits a result there. The
    /// execution error, when there is one, travels inside the result's outcome.
    slots: Vec<Mutex<Option<Arc<TxResult<V>>>>>,
    /// Index of the last confirmed transaction, `-1` before the first confirmation. Advances
    /// monotonically over the block; only the draining thread writes it.
    confirmed: AtomicI64,
    /// First fatal collect error; surfaced by the next drain instead of confirming past it.
    poison: Mutex<Option<ScheduleError<V::Error>>>,
}

impl<V: VmInterface> ConfirmQueue<V> {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Mutex::new(None)).collect(),
            confirmed: AtomicI64::new(-1),
            poison: Mutex::new(None),
        }
    }

    /// Highest confirmed transaction index, or `-1` before the first confirmation.
    pub(crate) fn highwater(&self) -> i64 {
        self.confirmed.load(Ordering::Acquire)
    }

    /// Deposits a parallel execution result at its transaction's slot.
    ///
    /// Called from worker threads. An out-of-range index poisons the queue; the driver reports
    /// it before the next drain rather than confirming past a hole.
    pub(crate) fn collect(&self, result: TxResult<V>) {
        let index = result.tx_index();
        let Some(slot) = self.slots.get(index) else {
            log::error!("collected result for tx {index} outside block of {}", self.slots.len());
            let mut poison = self.poison.lock();
            if poison.is_none() {
                *poison = Some(ScheduleError::IndexOutOfRange { index, len: self.slots.len() });
            }
            return;
        };

        *slot.lock() = Some(Arc::new(result));
    }

    /// Confirms transactions in ascending index order starting past the highwater mark,
    /// stopping at the first slot whose result has not arrived yet.
    pub(crate) fn drain_sequential(&self, vm: &V) -> Result<(), ScheduleError<V::Error>> {
        let start = (self.highwater() + 1) as usize;
        self.drain(start..self.slots.len(), vm)
    }

    /// Confirms the given level's transactions in level order.
    ///
    /// Valid when the DAG is trusted: level entries ascend in index and everything below them
    /// is already confirmed, so walking the level is walking block order. Still stops
    /// defensively at an unexecuted slot.
    pub(crate) fn drain_trusting(
        &self,
        level: &TxLevel<V::Transaction>,
        vm: &V,
    ) -> Result<(), ScheduleError<V::Error>> {
        self.drain(level.iter().map(|tx| tx.tx_index()), vm)
    }

    fn drain(
        &self,
        indices: impl IntoIterator<Item = usize>,
        vm: &V,
    ) -> Result<(), ScheduleError<V::Error>> {
        if let Some(err) = self.poison.lock().take() {
            return Err(err);
        }

        for index in indices {
            let result = match &*self.slots[index].lock() {
                Some(result) => result.clone(),
                // An unexecuted lower-index transaction blocks everything above it.
                None => break,
            };

            if let Some(err) = result.exec_err() {
                log::debug!("tx {index} failed parallel execution ({err:?}), re-executing");
                self.rerun(index, vm)?;
            } else if let Err(err) = vm.confirm_transaction(&result) {
                log::debug!("tx {index} conflicted at confirmation ({err:?}), re-executing");
                self.rerun(index, vm)?;
            }

            self.confirmed.store(index as i64, Ordering::Release);
        }
        Ok(())
    }

    /// Serially re-executes the transaction at `index` and confirms the fresh result.
    ///
    /// The slot is emptied first so the stale result (and its execution error) cannot be
    /// observed again; a successful rerun commits the new result into the slot but leaves
    /// advancing the highwater mark to the caller.
    fn rerun(&self, index: usize, vm: &V) -> Result<(), ScheduleError<V::Error>> {
        let previous =
            self.slots[index].lock().take().expect("rerun of a slot with no result");
        let request = previous.request().clone();

        let effects = match vm.execute_transaction(&request) {
            Ok(effects) => effects,
            Err(cause) => {
                log::warn!("tx {index} failed serial re-execution: {cause:?}");
                return Err(ScheduleError::RerunExecution { index, cause });
            }
        };

        let result = Arc::new(TxResult::new(request, Ok(effects)));
        *self.slots[index].lock() = Some(result.clone());

        if let Err(cause) = vm.confirm_transaction(&result) {
            log::warn!("tx {index} failed confirmation after re-execution: {cause:?}");
            return Err(ScheduleError::RerunConfirmation { index, cause });
        }
        Ok(())
    }
}
