use bitvec::prelude::*;

use crate::dataset::TransactionSet;
use crate::types::ItemId;

/// Support-counting primitive shared by every miner.
///
/// Holds one transaction bitmap per item (bit `t` set when transaction `t`
/// contains the item), so a support query is a bitmap intersection instead
/// of a rescan of the transaction list. The counting semantics are exactly
/// the subset test: a transaction supports an itemset when it contains
/// every item in it.
pub struct SupportCounter {
    bitmaps: Vec<BitVec<usize, Lsb0>>,
}

impl SupportCounter {
    pub fn new(dataset: &TransactionSet) -> Self {
        let total = dataset.len();
        let mut bitmaps = vec![bitvec![usize, Lsb0; 0; total]; dataset.num_items()];

        for (tid, transaction) in dataset.transactions().iter().enumerate() {
            for &item in transaction.items() {
                bitmaps[item].set(tid, true);
            }
        }

        SupportCounter { bitmaps }
    }

    /// Number of transactions whose item set is a superset of `itemset`.
    pub fn support(&self, itemset: &[ItemId]) -> u32 {
        debug_assert!(!itemset.is_empty(), "support query on an empty itemset");

        let (&first, rest) = match itemset.split_first() {
            Some(split) => split,
            None => return 0,
        };

        self.bitmaps[first]
            .iter_ones()
            .filter(|&tid| rest.iter().all(|&item| self.bitmaps[item][tid]))
            .count() as u32
    }
}
