//! Frequent itemset mining and association rule generation.
//!
//! Three interchangeable mining strategies over an immutable in-memory
//! transaction set:
//!
//! - [`BruteForceMiner`]: exhaustive level-wise enumeration of the whole
//!   item universe, the ground-truth baseline;
//! - [`AprioriMiner`]: level-wise candidate join/prune exploiting downward
//!   closure;
//! - [`FpGrowthMiner`]: recursive mining over a compact prefix tree, no
//!   candidate generation.
//!
//! All three must produce identical `(itemset, support)` maps for the same
//! input; [`generate_rules`] consumes any of their outputs uniformly. The
//! engine is pure and synchronous: thresholds and data arrive as explicit
//! parameters, nothing is persisted, and no I/O happens inside the crate.

pub mod dataset;
pub mod error;
pub mod miners;
pub mod rules;
pub mod support;
pub mod types;

pub use dataset::{Transaction, TransactionSet};
pub use error::Error;
pub use miners::{mine_all, AprioriMiner, BruteForceMiner, FpGrowthMiner, Miner};
pub use rules::{generate_rules, sort_rules, Rule};
pub use support::SupportCounter;
pub use types::{ItemId, Itemset, ItemsetCounts};

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;

    /// 20 pizza-store transactions: Pizza in 14, Coke in 8, both in 6.
    fn dominos() -> TransactionSet {
        TransactionSet::new(vec![
            ("trans1", vec!["Pizza", "Coke"]),
            ("trans2", vec!["Pizza", "Coke"]),
            ("trans3", vec!["Pizza", "Coke"]),
            ("trans4", vec!["Pizza", "Coke"]),
            ("trans5", vec!["Pizza", "Coke", "Garlic Bread"]),
            ("trans6", vec!["Pizza", "Coke", "Pepsi"]),
            ("trans7", vec!["Pizza", "Garlic Bread"]),
            ("trans8", vec!["Pizza", "Garlic Bread"]),
            ("trans9", vec!["Pizza", "Pepsi"]),
            ("trans10", vec!["Pizza", "Pepsi"]),
            ("trans11", vec!["Pizza", "Pasta"]),
            ("trans12", vec!["Pizza", "Salad"]),
            ("trans13", vec!["Pizza", "Brownie"]),
            ("trans14", vec!["Pizza", "Cheese Sticks"]),
            ("trans15", vec!["Coke", "Garlic Bread"]),
            ("trans16", vec!["Coke", "Chicken Wings"]),
            ("trans17", vec!["Pepsi", "Garlic Bread"]),
            ("trans18", vec!["Pepsi", "Chicken Wings"]),
            ("trans19", vec!["Pasta", "Brownie"]),
            ("trans20", vec!["Salad", "Dessert Pizza"]),
        ])
        .unwrap()
    }

    #[test]
    fn dominos_scenario_matches_across_all_miners() {
        let dataset = dominos();
        let min_frequency = dataset.min_frequency_for(20.0);
        assert_eq!(min_frequency, 4);

        let pizza = dataset.item_id("Pizza").unwrap();
        let coke = dataset.item_id("Coke").unwrap();
        let mut pizza_coke = vec![pizza, coke];
        pizza_coke.sort_unstable();

        let results = mine_all(&dataset, min_frequency).unwrap();
        let reference = &results[0].1;

        for (name, frequent) in &results {
            assert_eq!(frequent, reference, "{} diverged", name);
            assert_eq!(frequent[&vec![pizza]], 14, "{}", name);
            assert_eq!(frequent[&pizza_coke], 6, "{}", name);
        }
    }

    #[test]
    fn dominos_coke_implies_pizza_at_075() {
        let dataset = dominos();
        let pizza = dataset.item_id("Pizza").unwrap();
        let coke = dataset.item_id("Coke").unwrap();

        for (name, frequent) in mine_all(&dataset, 4).unwrap() {
            let mut rules = generate_rules(&frequent, 0.75).unwrap();
            sort_rules(&mut rules);

            assert_eq!(rules.len(), 1, "{}", name);
            let rule = &rules[0];
            assert_eq!(rule.antecedent, vec![coke]);
            assert_eq!(rule.consequent, vec![pizza]);
            assert!((rule.confidence - 0.75).abs() < f64::EPSILON);
            assert_eq!(rule.support, 6);
            assert_eq!(
                rule.display(&dataset),
                "{Coke} -> {Pizza} (confidence 0.75, support 6)"
            );
        }
    }

    #[test]
    fn threshold_above_every_item_empties_itemsets_and_rules() {
        let dataset = dominos();

        // Pizza tops out at 14.
        for (name, frequent) in mine_all(&dataset, 15).unwrap() {
            assert!(frequent.is_empty(), "{}", name);
            assert!(generate_rules(&frequent, 0.0).unwrap().is_empty());
        }
    }

    #[test]
    fn downward_closure_holds_for_every_miner() {
        let dataset = dominos();

        for (name, frequent) in mine_all(&dataset, 4).unwrap() {
            for (itemset, &count) in &frequent {
                for size in 1..itemset.len() {
                    for subset in itemset.iter().copied().combinations(size) {
                        let subset_count = frequent.get(&subset).unwrap_or_else(|| {
                            panic!("{}: subset {:?} of {:?} missing", name, subset, itemset)
                        });
                        assert!(*subset_count >= count);
                    }
                }
            }
        }
    }

    #[test]
    fn generated_confidences_respect_the_threshold() {
        let dataset = dominos();
        let frequent = AprioriMiner.mine(&dataset, 4).unwrap();

        let rules = generate_rules(&frequent, 0.4).unwrap();
        assert!(!rules.is_empty());
        for rule in &rules {
            assert!(rule.confidence >= 0.4 && rule.confidence <= 1.0);
        }
    }

    #[test]
    fn mining_is_idempotent() {
        let dataset = dominos();
        let miners: [&dyn Miner; 3] = [&BruteForceMiner, &AprioriMiner, &FpGrowthMiner];

        for miner in &miners {
            let first = miner.mine(&dataset, 4).unwrap();
            let second = miner.mine(&dataset, 4).unwrap();
            assert_eq!(first, second, "{}", miner.name());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn miners_always_agree(
            raw in proptest::collection::vec(
                proptest::collection::btree_set(0u8..6, 1..=4),
                1..16,
            ),
            min_frequency in 1u32..5,
        ) {
            let records: Vec<(String, Vec<String>)> = raw
                .iter()
                .enumerate()
                .map(|(position, items)| {
                    let names = items.iter().map(|n| format!("item{}", n)).collect();
                    (format!("t{}", position + 1), names)
                })
                .collect();
            let dataset = TransactionSet::new(records).unwrap();

            let reference = BruteForceMiner.mine(&dataset, min_frequency).unwrap();
            prop_assert_eq!(
                &AprioriMiner.mine(&dataset, min_frequency).unwrap(),
                &reference
            );
            prop_assert_eq!(
                &FpGrowthMiner.mine(&dataset, min_frequency).unwrap(),
                &reference
            );
        }
    }
}
