use std::{collections::HashMap, sync::Arc};

use pexec_core_types::{DepFlag, Transaction, TxDag};

use crate::{TxLevel, TxLevels};

impl<T: Transaction> TxLevels<T> {
    /// Partitions a block's transactions into dependency levels.
    ///
    /// A single pass over `all` in `tx_index` order. Without a DAG everything lands on one
    /// level (fully sequential confirmation still applies). With a DAG:
    ///
    /// - A transaction flagged [`DepFlag::Excluded`] or [`DepFlag::NonDependentRelative`]
    ///   occupies a fresh level by itself; the next independent transaction opens a new level
    ///   after it.
    /// - A transaction without predecessors joins the currently open level.
    /// - A transaction with predecessors lands one level below its deepest known predecessor.
    ///   When none of the listed predecessors is known the DAG is broken for this entry and the
    ///   transaction is tolerated on the open level.
    pub fn build(all: Vec<Arc<T>>, dag: Option<&dyn TxDag>) -> Self {
        if all.is_empty() {
            return Self::default();
        }
        let Some(dag) = dag else {
            return Self::from_levels(vec![TxLevel::new(all)]);
        };

        let mut levels: Vec<TxLevel<T>> = Vec::with_capacity(8);
        let mut current = 0;
        let mut marked: HashMap<usize, usize> = HashMap::with_capacity(all.len());

        for tx in all {
            let index = tx.tx_index();
            match dag.tx_dep(index) {
                Some(dep)
                    if dep.check_flag(DepFlag::Excluded)
                        || dep.check_flag(DepFlag::NonDependentRelative) =>
                {
                    levels.push(TxLevel::new(vec![tx]));
                    marked.insert(index, levels.len() - 1);
                    current = levels.len();
                }
                Some(dep) if !dep.predecessors().is_empty() => {
                    let prev =
                        dep.predecessors().iter().filter_map(|p| marked.get(p).copied()).max();
                    let target = match prev {
                        Some(prev) => prev + 1,
                        None => {
                            log::debug!(
                                "tx {index} lists only unknown predecessors, placing on level {current}"
                            );
                            current
                        }
                    };
                    place(&mut levels, target, tx);
                    marked.insert(index, target);
                }
                _ => {
                    // No entry, or an entry without predecessors: independent of everything
                    // seen so far.
                    place(&mut levels, current, tx);
                    marked.insert(index, current);
                }
            }
        }

        Self::from_levels(levels)
    }
}

fn place<T>(levels: &mut Vec<TxLevel<T>>, target: usize, tx: Arc<T>) {
    while levels.len() <= target {
        levels.push(TxLevel::empty());
    }
    levels[target].push(tx);
}

#[cfg(test)]
mod tests {
    use pexec_core_types::{PlainTxDag, TxDep};

    use super::*;

    struct Tx(usize);

    impl Transaction for Tx {
        fn tx_index(&self) -> usize {
            self.0
        }

        fn sender(&self) -> u64 {
            self.0 as u64
        }

        fn recipient(&self) -> Option<u64> {
            None
        }

        type AccountId = u64;
    }

    fn txs(n: usize) -> Vec<Arc<Tx>> {
        (0..n).map(|i| Arc::new(Tx(i))).collect()
    }

    fn shape(levels: &TxLevels<Tx>) -> Vec<Vec<usize>> {
        levels.iter().map(|l| l.iter().map(|tx| tx.tx_index()).collect()).collect()
    }

    #[test]
    fn test_empty_block_yields_no_levels() {
        let levels = TxLevels::<Tx>::build(Vec::new(), None);
        assert!(levels.is_empty());
        assert_eq!(levels.tx_count(), 0);
    }

    #[test]
    fn test_no_dag_yields_single_level() {
        let levels = TxLevels::build(txs(10), None);
        assert_eq!(shape(&levels), vec![(0..10).collect::<Vec<_>>()]);
    }

    #[test]
    fn test_empty_dag_yields_single_level() {
        let dag = PlainTxDag::new();
        let levels = TxLevels::build(txs(5), Some(&dag));
        assert_eq!(shape(&levels), vec![(0..5).collect::<Vec<_>>()]);
    }

    #[test]
    fn test_linear_chain() {
        let mut dag = PlainTxDag::new();
        for i in 1..4 {
            dag.set_tx_dep(i, TxDep::new(vec![i - 1]));
        }
        let levels = TxLevels::build(txs(4), Some(&dag));
        assert_eq!(shape(&levels), vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_diamond() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(1, TxDep::new(vec![0]));
        dag.set_tx_dep(2, TxDep::new(vec![0]));
        dag.set_tx_dep(3, TxDep::new(vec![1, 2]));
        let levels = TxLevels::build(txs(4), Some(&dag));
        assert_eq!(shape(&levels), vec![vec![0], vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_flagged_tx_occupies_own_level() {
        for flag in [DepFlag::Excluded, DepFlag::NonDependentRelative] {
            let mut dag = PlainTxDag::new();
            dag.set_tx_dep(2, TxDep::flagged(flag));
            let levels = TxLevels::build(txs(5), Some(&dag));
            assert_eq!(shape(&levels), vec![vec![0, 1], vec![2], vec![3, 4]]);
        }
    }

    #[test]
    fn test_unknown_predecessors_fall_back_to_open_level() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(1, TxDep::new(vec![77]));
        let levels = TxLevels::build(txs(3), Some(&dag));
        assert_eq!(shape(&levels), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_dependency_on_flagged_tx() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(1, TxDep::flagged(DepFlag::Excluded));
        dag.set_tx_dep(2, TxDep::new(vec![1]));
        let levels = TxLevels::build(txs(3), Some(&dag));
        assert_eq!(shape(&levels), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_every_edge_crosses_a_level_boundary() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(2, TxDep::new(vec![0]));
        dag.set_tx_dep(3, TxDep::new(vec![2, 1]));
        dag.set_tx_dep(5, TxDep::new(vec![4, 3]));
        let levels = TxLevels::build(txs(6), Some(&dag));

        let level_of: HashMap<usize, usize> = levels
            .iter()
            .enumerate()
            .flat_map(|(depth, l)| l.iter().map(move |tx| (tx.tx_index(), depth)))
            .collect();
        for (tx, preds) in [(2, vec![0]), (3, vec![2, 1]), (5, vec![4, 3])] {
            for pred in preds {
                assert!(level_of[&pred] < level_of[&tx], "edge {pred} -> {tx} inside a level");
            }
        }
    }

    #[test]
    fn test_levels_ascend_internally() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(1, TxDep::new(vec![0]));
        dag.set_tx_dep(3, TxDep::new(vec![0]));
        let levels = TxLevels::build(txs(5), Some(&dag));
        for level in levels.iter() {
            let indexes: Vec<_> = level.iter().map(|tx| tx.tx_index()).collect();
            let mut sorted = indexes.clone();
            sorted.sort_unstable();
            assert_eq!(indexes, sorted);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut dag = PlainTxDag::new();
        dag.set_tx_dep(1, TxDep::new(vec![0]));
        dag.set_tx_dep(4, TxDep::flagged(DepFlag::Excluded));
        let first = shape(&TxLevels::build(txs(6), Some(&dag)));
        let second = shape(&TxLevels::build(txs(6), Some(&dag)));
        assert_eq!(first, second);
    }
}
