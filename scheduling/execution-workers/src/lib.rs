mod execution_workers;
mod task;
mod worker;

pub use execution_workers::ExecutionWorkers;
pub use task::Task;
