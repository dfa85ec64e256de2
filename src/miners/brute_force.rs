use itertools::Itertools;
use log::debug;

use crate::dataset::TransactionSet;
use crate::error::Error;
use crate::miners::{validate_min_frequency, Miner};
use crate::support::SupportCounter;
use crate::types::{ItemId, ItemsetCounts};

/// Exhaustive level-wise enumeration over the whole item universe.
///
/// At every size k this regenerates all C(|universe|, k) combinations rather
/// than extending previously frequent itemsets. Exponential in the worst
/// case; kept as the ground-truth baseline the other strategies are checked
/// against.
pub struct BruteForceMiner;

impl Miner for BruteForceMiner {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn mine(
        &self,
        dataset: &TransactionSet,
        min_frequency: u32,
    ) -> Result<ItemsetCounts, Error> {
        validate_min_frequency(min_frequency)?;

        let counter = SupportCounter::new(dataset);
        let universe: Vec<ItemId> = dataset.universe().collect();
        let mut frequent = ItemsetCounts::new();

        // Once no itemset of size k is frequent, none of size k+1 can be.
        for size in 1..=universe.len() {
            debug!("counting all {}-item combinations", size);
            let mut found = 0usize;

            for itemset in universe.iter().copied().combinations(size) {
                let count = counter.support(&itemset);
                if count >= min_frequency {
                    frequent.insert(itemset, count);
                    found += 1;
                }
            }

            debug!("{} frequent itemsets of size {}", found, size);
            if found == 0 {
                break;
            }
        }

        Ok(frequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn finds_all_frequent_itemsets() {
        let dataset = TransactionSet::new(vec![
            ("t1", vec!["a", "b"]),
            ("t2", vec!["a", "c"]),
            ("t3", vec!["a", "b", "c"]),
            ("t4", vec!["b", "d"]),
        ])
        .unwrap();

        let frequent = BruteForceMiner.mine(&dataset, 2).unwrap();

        // a=0, b=1, c=2 (d appears once and drops out).
        assert_eq!(
            frequent,
            hashmap! {
                vec![0] => 3,
                vec![1] => 3,
                vec![2] => 2,
                vec![0, 1] => 2,
                vec![0, 2] => 2,
            }
        );
    }

    #[test]
    fn threshold_above_every_item_yields_empty_result() {
        let dataset =
            TransactionSet::new(vec![("t1", vec!["a", "b"]), ("t2", vec!["a"])]).unwrap();

        let frequent = BruteForceMiner.mine(&dataset, 3).unwrap();
        assert!(frequent.is_empty());
    }

    #[test]
    fn saturated_universe_terminates() {
        // Every combination of the full universe is frequent; the size loop
        // must stop at |universe|.
        let dataset = TransactionSet::new(vec![
            ("t1", vec!["a", "b", "c"]),
            ("t2", vec!["a", "b", "c"]),
        ])
        .unwrap();

        let frequent = BruteForceMiner.mine(&dataset, 2).unwrap();

        assert_eq!(frequent.len(), 7);
        assert_eq!(frequent[&vec![0, 1, 2]], 2);
    }
}
