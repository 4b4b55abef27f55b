use std::hash::Hash;

/// Identifies an account touched by a transaction.
///
/// The DAG predictor keys its last-writer map by account. Anything hashable and cheaply
/// clonable qualifies; production transactions use 20-byte addresses, tests use integers.
pub trait AccountId: Clone + Eq + Hash + Send + Sync + 'static {}

impl<T: Clone + Eq + Hash + Send + Sync + 'static> AccountId for T {}
