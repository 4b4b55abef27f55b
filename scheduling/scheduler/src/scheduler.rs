use std::sync::Arc;

use crossbeam_utils::sync::WaitGroup;
use pexec_scheduling_execution_workers::ExecutionWorkers;

use crate::{ConfirmQueue, ExecutionConfig, ScheduleError, TxLevels, TxResult, VmInterface};

/// Drives the parallel execution and sequential confirmation of whole blocks.
///
/// One scheduler serves many blocks. The worker pool it owns is created once and shared across
/// `execute_block` calls, bounding total concurrency no matter how many blocks are validated
/// over its lifetime.
pub struct Scheduler<V: VmInterface> {
    vm: V,
    trust_dag: bool,
    workers: ExecutionWorkers,
}

impl<V: VmInterface> Scheduler<V> {
    /// Creates a new scheduler from the given execution configuration.
    pub fn new(config: ExecutionConfig<V>) -> Self {
        let (worker_count, trust_dag, vm) = config.unpack();
        Self { vm, trust_dag, workers: ExecutionWorkers::new(worker_count) }
    }

    /// Number of transactions the scheduler executes concurrently at most.
    pub fn worker_count(&self) -> usize {
        self.workers.worker_count()
    }

    /// Executes and confirms a block partitioned into dependency levels.
    ///
    /// Levels run strictly in order: each is split into per-worker chunks, fanned out across
    /// the pool, joined at a barrier, and fully confirmed before the next level starts. On
    /// success every transaction has been confirmed exactly once, ascending in `tx_index`
    /// within each level; with the trusting path disabled the order is ascending over the
    /// whole block. The first fatal error aborts the remaining levels and names the
    /// transaction it occurred on; work already dispatched for the failing level has
    /// completed by then (the barrier precedes confirmation).
    pub fn execute_block(
        &self,
        levels: &TxLevels<V::Transaction>,
    ) -> Result<(), ScheduleError<V::Error>> {
        let queue = Arc::new(ConfirmQueue::new(levels.tx_count()));

        for level in levels.iter() {
            // Chunking amortizes channel overhead across several transactions per task.
            let barrier = WaitGroup::new();
            for chunk in level.split(self.workers.worker_count()) {
                let vm = self.vm.clone();
                let queue = queue.clone();
                let barrier = barrier.clone();
                self.workers.submit(move || {
                    for tx in chunk.iter() {
                        let outcome = vm.execute_transaction(tx);
                        queue.collect(TxResult::new(tx.clone(), outcome));
                    }
                    drop(barrier);
                });
            }
            barrier.wait();

            // The whole level has executed; confirm it before touching the next one.
            if self.trust_dag {
                queue.drain_trusting(level, &self.vm)?;
            } else {
                queue.drain_sequential(&self.vm)?;
            }
        }
        Ok(())
    }

    /// Joins the owned worker pool after its pending tasks drain.
    pub fn shutdown(self) {
        self.workers.shutdown();
    }
}
