/// Fatal errors surfaced by block execution.
///
/// A single failed parallel execution or confirmation is not an error here; those are conflict
/// signals absorbed by the rerun path. Every variant aborts the block and names the
/// transaction it failed on.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError<E> {
    /// A collected result's index does not fit the block. Programming error in the caller.
    #[error("tx index {index} out of range for a block of {len} transactions")]
    IndexOutOfRange { index: usize, len: usize },

    /// Serial re-execution of a conflicted transaction failed again.
    #[error("tx {index} failed during serial re-execution")]
    RerunExecution { index: usize, cause: E },

    /// Confirmation failed even against a fresh serial re-execution.
    #[error("tx {index} failed confirmation after re-execution")]
    RerunConfirmation { index: usize, cause: E },
}

impl<E> ScheduleError<E> {
    /// The index of the transaction the block failed on.
    pub fn tx_index(&self) -> usize {
        match self {
            Self::IndexOutOfRange { index, .. }
            | Self::RerunExecution { index, .. }
            | Self::RerunConfirmation { index, .. } => *index,
        }
    }

    /// The underlying VM error, when one caused the failure.
    pub fn cause(&self) -> Option<&E> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::RerunExecution { cause, .. } | Self::RerunConfirmation { cause, .. } => {
                Some(cause)
            }
        }
    }
}
