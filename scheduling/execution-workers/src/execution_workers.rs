use std::{sync::OnceLock, thread::JoinHandle};

use crossbeam_channel::Sender;

use crate::{Task, worker::Worker};

/// A fixed set of long-lived threads consuming tasks from a shared bounded channel.
///
/// The channel capacity equals the worker count, so a submitter that outpaces the workers
/// blocks until a slot frees up. That backpressure is the only flow control the pool provides.
pub struct ExecutionWorkers {
    tasks: Sender<Task>,
    handles: Vec<JoinHandle<()>>,
}

impl ExecutionWorkers {
    /// Creates a pool of `worker_count` threads (at least one).
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (tasks, receiver) = crossbeam_channel::bounded(worker_count);
        let handles =
            (0..worker_count).map(|id| Worker::new(id, receiver.clone()).start()).collect();

        Self { tasks, handles }
    }

    /// Returns the process-wide pool, sized to the host CPU count.
    ///
    /// Created on first use and never torn down; its threads are reclaimed at process exit.
    pub fn global() -> &'static ExecutionWorkers {
        static GLOBAL: OnceLock<ExecutionWorkers> = OnceLock::new();
        GLOBAL.get_or_init(|| ExecutionWorkers::new(num_cpus::get()))
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Submits a task, blocking while the channel is full.
    pub fn submit(&self, task: impl FnOnce() + Send + 'static) {
        self.tasks.send(Box::new(task)).expect("execution worker channel disconnected");
    }

    /// Disconnects the channel and joins all workers after they drain the remaining tasks.
    pub fn shutdown(self) {
        drop(self.tasks);
        for handle in self.handles {
            handle.join().expect("execution worker panicked");
        }
    }
}
