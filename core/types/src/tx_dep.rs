/// Flags refining how a transaction may be scheduled relative to the rest of its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepFlag {
    /// The transaction must execute and confirm alone on a level of its own.
    Excluded,
    /// Not comparable to its relatives; treated like [`DepFlag::Excluded`] by the level builder.
    NonDependentRelative,
}

/// Per-transaction dependency record: predecessor indices plus scheduling flags.
///
/// Predecessor lists are kept ascending by the code that emits them (the DAG predictor and any
/// external DAG builder honoring the same convention).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxDep {
    predecessors: Vec<usize>,
    excluded: bool,
    non_dependent_relative: bool,
}

impl TxDep {
    /// A record depending on the given transaction indices.
    pub fn new(predecessors: Vec<usize>) -> Self {
        Self { predecessors, ..Self::default() }
    }

    /// A record with no predecessors carrying the given flag.
    pub fn flagged(flag: DepFlag) -> Self {
        Self::default().with_flag(flag)
    }

    /// Sets the given flag.
    pub fn with_flag(mut self, flag: DepFlag) -> Self {
        match flag {
            DepFlag::Excluded => self.excluded = true,
            DepFlag::NonDependentRelative => self.non_dependent_relative = true,
        }
        self
    }

    /// Returns whether the given flag is set.
    pub fn check_flag(&self, flag: DepFlag) -> bool {
        match flag {
            DepFlag::Excluded => self.excluded,
            DepFlag::NonDependentRelative => self.non_dependent_relative,
        }
    }

    /// The transaction indices this transaction depends on.
    pub fn predecessors(&self) -> &[usize] {
        &self.predecessors
    }
}
