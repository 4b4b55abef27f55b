use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use crate::Task;

pub(crate) struct Worker {
    id: usize,
    tasks: Receiver<Task>,
}

impl Worker {
    pub(crate) fn new(id: usize, tasks: Receiver<Task>) -> Self {
        Self { id, tasks }
    }

    pub(crate) fn start(self) -> JoinHandle<()> {
        thread::Builder::new()
            .name(format!("execution-worker-{}", self.id))
            .spawn(move || self.run())
            .expect("failed to spawn execution worker")
    }

    // Tasks run to completion once dequeued; the loop ends when the channel disconnects.
    fn run(self) {
        for task in self.tasks.iter() {
            task();
        }
    }
}
