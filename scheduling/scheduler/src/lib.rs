mod config;
mod confirm_queue;
mod dag_predictor;
mod error;
mod level_builder;
mod scheduler;
mod tx_level;
mod tx_result;
mod vm_interface;

pub use config::ExecutionConfig;
pub use error::ScheduleError;
pub use scheduler::Scheduler;
pub use tx_level::{TxLevel, TxLevels};
pub use tx_result::TxResult;
pub use vm_interface::VmInterface;

pub(crate) use confirm_queue::ConfirmQueue;
