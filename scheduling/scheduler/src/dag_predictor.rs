use std::collections::HashMap;

use pexec_core_types::{Transaction, TxDag, TxDep};

use crate::TxLevel;

impl<T: Transaction> TxLevel<T> {
    /// Derives a dependency record for each transaction from the accounts it touches.
    ///
    /// Walks the level in order, tracking the last transaction that touched each sender or
    /// recipient account. Each transaction depends on the last touchers of its own two
    /// accounts; a missing recipient (contract creation) contributes no edge. Emitted
    /// predecessor lists are ascending.
    ///
    /// The heuristic deliberately over-approximates: a false dependency only costs
    /// parallelism, while any conflict it misses is caught at confirmation time and repaired
    /// by the rerun path.
    pub fn predict_dag(&self, dag: &mut dyn TxDag) {
        let mut marked: HashMap<T::AccountId, usize> = HashMap::with_capacity(self.len());

        for tx in self.iter() {
            let sender = tx.sender();
            let recipient = tx.recipient();

            let mut first = marked.get(&sender).copied();
            let mut second = recipient.as_ref().and_then(|to| marked.get(to).copied());
            if let (Some(f), Some(s)) = (first, second) {
                if f > s {
                    std::mem::swap(&mut first, &mut second);
                }
            }

            let mut predecessors = Vec::with_capacity(2);
            if let Some(p) = first {
                predecessors.push(p);
            }
            if let Some(p) = second {
                // Sender and recipient may share a last toucher; one edge is enough.
                if first != Some(p) {
                    predecessors.push(p);
                }
            }
            dag.set_tx_dep(tx.tx_index(), TxDep::new(predecessors));

            marked.insert(sender, tx.tx_index());
            if let Some(to) = recipient {
                marked.insert(to, tx.tx_index());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pexec_core_types::PlainTxDag;

    use super::*;

    struct Tx {
        index: usize,
        sender: u64,
        recipient: Option<u64>,
    }

    impl Transaction for Tx {
        fn tx_index(&self) -> usize {
            self.index
        }

        fn sender(&self) -> u64 {
            self.sender
        }

        fn recipient(&self) -> Option<u64> {
            self.recipient
        }

        type AccountId = u64;
    }

    fn level(txs: Vec<(usize, u64, Option<u64>)>) -> TxLevel<Tx> {
        TxLevel::new(
            txs.into_iter()
                .map(|(index, sender, recipient)| Arc::new(Tx { index, sender, recipient }))
                .collect(),
        )
    }

    fn preds(dag: &PlainTxDag, index: usize) -> Vec<usize> {
        dag.tx_dep(index).map(|dep| dep.predecessors().to_vec()).unwrap_or_default()
    }

    #[test]
    fn test_untouched_accounts_have_no_predecessors() {
        let level = level(vec![(0, 1, Some(2)), (1, 3, Some(4))]);
        let mut dag = PlainTxDag::new();
        level.predict_dag(&mut dag);
        assert_eq!(preds(&dag, 0), Vec::<usize>::new());
        assert_eq!(preds(&dag, 1), Vec::<usize>::new());
    }

    #[test]
    fn test_same_sender_chains() {
        let level = level(vec![(0, 1, Some(2)), (1, 1, Some(3)), (2, 1, Some(4))]);
        let mut dag = PlainTxDag::new();
        level.predict_dag(&mut dag);
        assert_eq!(preds(&dag, 1), vec![0]);
        assert_eq!(preds(&dag, 2), vec![1]);
    }

    #[test]
    fn test_predecessors_are_ascending() {
        // tx2's sender was last touched by tx1, its recipient by tx0: emitted ascending.
        let level = level(vec![(0, 1, Some(2)), (1, 3, Some(4)), (2, 4, Some(1))]);
        let mut dag = PlainTxDag::new();
        level.predict_dag(&mut dag);
        assert_eq!(preds(&dag, 2), vec![0, 1]);
    }

    #[test]
    fn test_shared_last_toucher_emits_one_edge() {
        // tx1 touches both accounts of tx0.
        let level = level(vec![(0, 1, Some(2)), (1, 1, Some(2))]);
        let mut dag = PlainTxDag::new();
        level.predict_dag(&mut dag);
        assert_eq!(preds(&dag, 1), vec![0]);
    }

    #[test]
    fn test_contract_creation_has_no_recipient_edge() {
        let level = level(vec![(0, 1, None), (1, 2, Some(1))]);
        let mut dag = PlainTxDag::new();
        level.predict_dag(&mut dag);
        // Account 1 is tx0's sender, so tx1's recipient edge points at tx0.
        assert_eq!(preds(&dag, 1), vec![0]);
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let level = level(vec![(0, 1, Some(2)), (1, 2, Some(3)), (2, 3, Some(1))]);
        let mut first = PlainTxDag::new();
        level.predict_dag(&mut first);
        let mut second = first.clone();
        level.predict_dag(&mut second);
        for i in 0..3 {
            assert_eq!(first.tx_dep(i), second.tx_dep(i));
        }
    }
}
