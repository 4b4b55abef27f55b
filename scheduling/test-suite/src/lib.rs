mod transaction;
mod vm;

pub use transaction::TestTx;
pub use vm::TestVm;
