use crate::AccountId;

/// The scheduler-visible face of a transaction request.
///
/// Everything else a transaction carries (payload, gas, signature) is opaque to the scheduler
/// and consumed only by the VM that executes and confirms it.
pub trait Transaction: Send + Sync + 'static {
    /// Zero-based position of this transaction within its block. Unique and dense.
    fn tx_index(&self) -> usize;

    /// The sending account.
    fn sender(&self) -> Self::AccountId;

    /// The receiving account, or `None` for contract creation.
    fn recipient(&self) -> Option<Self::AccountId>;

    type AccountId: AccountId;
}
