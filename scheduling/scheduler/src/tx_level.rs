use std::{slice, sync::Arc};

/// An ordered set of transactions with no dependency edges between them.
///
/// Entries stay in ascending `tx_index` order; the trusting confirmation path relies on this.
pub struct TxLevel<T> {
    txs: Vec<Arc<T>>,
}

impl<T> TxLevel<T> {
    pub fn new(txs: Vec<Arc<T>>) -> Self {
        Self { txs }
    }

    pub(crate) fn empty() -> Self {
        Self { txs: Vec::new() }
    }

    pub(crate) fn push(&mut self, tx: Arc<T>) {
        self.txs.push(tx);
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<T>> {
        self.txs.iter()
    }

    /// Partitions into contiguous chunks of `chunk_size` transactions; the last chunk may be
    /// shorter. A zero chunk size is treated as one.
    pub fn split_by(&self, chunk_size: usize) -> Vec<TxLevel<T>> {
        if self.txs.is_empty() {
            return Vec::new();
        }
        self.txs.chunks(chunk_size.max(1)).map(|chunk| TxLevel { txs: chunk.to_vec() }).collect()
    }

    /// Partitions into at most `chunks` roughly equal contiguous chunks.
    ///
    /// The chunk size is `ceil(len / chunks)`, so the division can leave fewer than `chunks`
    /// non-empty chunks; trailing empty ones are dropped. An empty level yields no chunks.
    pub fn split(&self, chunks: usize) -> Vec<TxLevel<T>> {
        if self.txs.is_empty() {
            return Vec::new();
        }
        self.split_by(self.txs.len().div_ceil(chunks.max(1)))
    }
}

/// A block's transactions partitioned by dependency depth.
///
/// Levels are ordered such that for any dependency edge `a -> b`, the level of `a` is strictly
/// below the level of `b`. Lives exactly one block.
pub struct TxLevels<T> {
    levels: Vec<TxLevel<T>>,
}

impl<T> TxLevels<T> {
    pub(crate) fn from_levels(levels: Vec<TxLevel<T>>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, TxLevel<T>> {
        self.levels.iter()
    }

    /// Total number of transactions across all levels.
    pub fn tx_count(&self) -> usize {
        self.levels.iter().map(TxLevel::len).sum()
    }
}

impl<T> Default for TxLevels<T> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(len: usize) -> TxLevel<usize> {
        TxLevel::new((0..len).map(Arc::new).collect())
    }

    fn flatten(chunks: &[TxLevel<usize>]) -> Vec<usize> {
        chunks.iter().flat_map(|c| c.iter().map(|tx| **tx)).collect()
    }

    #[test]
    fn test_split_by_chunk_sizes() {
        let chunks = level(10).split_by(3);
        assert_eq!(chunks.iter().map(TxLevel::len).collect::<Vec<_>>(), vec![3, 3, 3, 1]);
        assert_eq!(flatten(&chunks), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_by_zero_chunk_size() {
        let chunks = level(3).split_by(0);
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_split_caps_chunk_count() {
        let chunks = level(10).split(4);
        assert!(chunks.len() <= 4);
        assert_eq!(flatten(&chunks), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_drops_trailing_empty_chunks() {
        // ceil(4 / 3) = 2, so only two chunks materialize.
        let chunks = level(4).split(3);
        assert_eq!(chunks.iter().map(TxLevel::len).collect::<Vec<_>>(), vec![2, 2]);
    }

    #[test]
    fn test_split_empty_level() {
        assert!(level(0).split(4).is_empty());
        assert!(level(0).split_by(4).is_empty());
    }

    #[test]
    fn test_split_more_chunks_than_txs() {
        let chunks = level(2).split(8);
        assert_eq!(chunks.len(), 2);
        assert_eq!(flatten(&chunks), vec![0, 1]);
    }

    #[test]
    fn test_tx_count_sums_levels() {
        let levels = TxLevels::from_levels(vec![level(3), level(0), level(2)]);
        assert_eq!(levels.tx_count(), 5);
    }
}
