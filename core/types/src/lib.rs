mod account_id;
mod transaction;
mod tx_dag;
mod tx_dep;

pub use account_id::AccountId;
pub use transaction::Transaction;
pub use tx_dag::{PlainTxDag, TxDag};
pub use tx_dep::{DepFlag, TxDep};
