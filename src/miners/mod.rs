pub mod apriori;
pub mod brute_force;
pub mod fpgrowth;

use rayon::prelude::*;

use crate::dataset::TransactionSet;
use crate::error::Error;
use crate::types::ItemsetCounts;

pub use apriori::AprioriMiner;
pub use brute_force::BruteForceMiner;
pub use fpgrowth::FpGrowthMiner;

/// A frequent-itemset mining strategy.
///
/// All implementations are interchangeable: for the same transaction set and
/// threshold they must produce identical itemsets with identical support
/// counts. Each miner owns its own scratch state and returns a freshly
/// constructed result with no aliasing back into the caller's data.
pub trait Miner: Sync {
    fn name(&self) -> &'static str;

    /// Mine all itemsets with support count >= `min_frequency` (an absolute
    /// transaction count, not a fraction).
    fn mine(
        &self,
        dataset: &TransactionSet,
        min_frequency: u32,
    ) -> Result<ItemsetCounts, Error>;
}

pub(crate) fn validate_min_frequency(min_frequency: u32) -> Result<(), Error> {
    if min_frequency == 0 {
        Err(Error::ZeroMinFrequency)
    } else {
        Ok(())
    }
}

/// Run all three miners over the same transaction set, in parallel.
///
/// The miners share nothing and each read the transaction set immutably, so
/// this is purely a comparison-harness optimization; results are returned in
/// a fixed order (brute force, Apriori, FP-Growth) regardless of completion
/// order.
pub fn mine_all(
    dataset: &TransactionSet,
    min_frequency: u32,
) -> Result<Vec<(&'static str, ItemsetCounts)>, Error> {
    let miners: [&dyn Miner; 3] = [&BruteForceMiner, &AprioriMiner, &FpGrowthMiner];

    miners
        .par_iter()
        .map(|miner| Ok((miner.name(), miner.mine(dataset, min_frequency)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> TransactionSet {
        TransactionSet::new(vec![
            ("t1", vec!["a", "b"]),
            ("t2", vec!["a", "c"]),
            ("t3", vec!["a", "b", "c"]),
            ("t4", vec!["b", "d"]),
        ])
        .unwrap()
    }

    #[test]
    fn zero_min_frequency_is_rejected_by_every_miner() {
        let dataset = dataset();
        let miners: [&dyn Miner; 3] = [&BruteForceMiner, &AprioriMiner, &FpGrowthMiner];

        for miner in &miners {
            assert_eq!(
                miner.mine(&dataset, 0).unwrap_err(),
                Error::ZeroMinFrequency,
                "{}",
                miner.name()
            );
        }
    }

    #[test]
    fn mine_all_reports_each_strategy_once() {
        let results = mine_all(&dataset(), 2).unwrap();

        let names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["brute-force", "apriori", "fp-growth"]);

        let reference = &results[0].1;
        for (name, counts) in &results {
            assert_eq!(counts, reference, "{} diverged from brute force", name);
        }
    }
}
