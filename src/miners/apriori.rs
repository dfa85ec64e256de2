use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::dataset::TransactionSet;
use crate::error::Error;
use crate::miners::{validate_min_frequency, Miner};
use crate::support::SupportCounter;
use crate::types::{ItemsetCounts, Itemset};

/// Level-wise mining with downward-closure pruning.
///
/// Size-1 candidates are every item in the universe; size-(k+1) candidates
/// are produced only by joining frequent size-k itemsets sharing a
/// size-(k-1) prefix, then dropping any candidate with an infrequent size-k
/// subset. Must produce itemset-for-itemset the same result as
/// [`BruteForceMiner`](crate::BruteForceMiner).
pub struct AprioriMiner;

impl Miner for AprioriMiner {
    fn name(&self) -> &'static str {
        "apriori"
    }

    fn mine(
        &self,
        dataset: &TransactionSet,
        min_frequency: u32,
    ) -> Result<ItemsetCounts, Error> {
        validate_min_frequency(min_frequency)?;

        let counter = SupportCounter::new(dataset);
        let mut frequent = ItemsetCounts::new();

        let singletons: Vec<Itemset> = dataset.universe().map(|item| vec![item]).collect();
        let mut level = count_candidates(singletons, &counter, min_frequency);

        while !level.is_empty() {
            debug!("{} frequent itemsets at this level", level.len());

            let prev: Vec<Itemset> = level.keys().cloned().collect();
            frequent.extend(level);

            let candidates = prune(join(prev.clone()), &prev);
            debug!("{} candidates after join and prune", candidates.len());

            level = count_candidates(candidates, &counter, min_frequency);
        }

        Ok(frequent)
    }
}

fn count_candidates(
    candidates: Vec<Itemset>,
    counter: &SupportCounter,
    min_frequency: u32,
) -> ItemsetCounts {
    candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let count = counter.support(&candidate);
            if count >= min_frequency {
                Some((candidate, count))
            } else {
                None
            }
        })
        .collect()
}

/// Join frequent size-k itemsets into size-(k+1) candidates.
///
/// After sorting, itemsets sharing their first k-1 items form a contiguous
/// run; every pair of distinct last items within a run combines with the
/// shared prefix into one candidate. Candidates come out canonical because
/// last items are ascending within a run.
fn join(mut itemsets: Vec<Itemset>) -> Vec<Itemset> {
    itemsets.sort_unstable();

    let mut candidates: Vec<Itemset> = Vec::new();
    let mut start = 0;

    while start < itemsets.len() {
        let prefix_len = itemsets[start].len() - 1;
        let prefix = &itemsets[start][..prefix_len];

        let mut end = start + 1;
        while end < itemsets.len() && itemsets[end][..prefix_len] == *prefix {
            end += 1;
        }

        for pair in itemsets[start..end].iter().combinations(2) {
            let mut candidate = Vec::with_capacity(prefix_len + 2);
            candidate.extend_from_slice(prefix);
            candidate.push(pair[0][prefix_len]);
            candidate.push(pair[1][prefix_len]);
            candidates.push(candidate);
        }

        start = end;
    }

    candidates
}

/// Drop candidates with any size-k subset that was not frequent.
fn prune(candidates: Vec<Itemset>, frequent_prev: &[Itemset]) -> Vec<Itemset> {
    candidates
        .into_iter()
        .filter(|candidate| {
            candidate
                .iter()
                .copied()
                .combinations(candidate.len() - 1)
                .all(|subset| frequent_prev.contains(&subset))
        })
        .collect()
}
