use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::dataset::TransactionSet;
use crate::error::Error;
use crate::types::{ItemsetCounts, Itemset};

/// An association rule `antecedent -> consequent`.
///
/// Antecedent and consequent are disjoint, non-empty, canonical itemsets
/// whose union is a frequent itemset; `support` is the absolute support
/// count of that union.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub confidence: f64,
    pub support: u32,
}

impl Rule {
    /// Render the rule with item names for presentation layers.
    pub fn display(&self, dataset: &TransactionSet) -> String {
        let names = |itemset: &Itemset| {
            itemset
                .iter()
                .map(|&item| dataset.item_name(item))
                .join(", ")
        };
        format!(
            "{{{}}} -> {{{}}} (confidence {:.2}, support {})",
            names(&self.antecedent),
            names(&self.consequent),
            self.confidence,
            self.support
        )
    }
}

/// Derive association rules from any miner's frequent-itemset output.
///
/// Every itemset of size >= 2 is split into all 2^n - 2 antecedent /
/// consequent pairs; a rule is kept when
/// `support(union) / support(antecedent) >= min_confidence`. Antecedent
/// supports are looked up in the same result map: downward closure
/// guarantees every antecedent is present with a nonzero count, so a miss
/// is a miner bug and panics rather than being skipped.
pub fn generate_rules(
    itemsets: &ItemsetCounts,
    min_confidence: f64,
) -> Result<Vec<Rule>, Error> {
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(Error::InvalidMinConfidence(min_confidence));
    }

    let mut rules = Vec::new();

    for (itemset, &union_count) in itemsets {
        if itemset.len() < 2 {
            continue;
        }

        for split in 1..itemset.len() {
            for antecedent in itemset.iter().copied().combinations(split) {
                let antecedent_count = *itemsets.get(&antecedent).unwrap_or_else(|| {
                    panic!(
                        "antecedent {:?} of frequent itemset {:?} missing from result; \
                         downward closure violated by the miner",
                        antecedent, itemset
                    )
                });
                assert!(
                    antecedent_count > 0,
                    "zero support recorded for frequent antecedent {:?}",
                    antecedent
                );

                let confidence = f64::from(union_count) / f64::from(antecedent_count);
                if confidence >= min_confidence {
                    let consequent: Itemset = itemset
                        .iter()
                        .copied()
                        .filter(|item| !antecedent.contains(item))
                        .collect();
                    rules.push(Rule {
                        antecedent,
                        consequent,
                        confidence,
                        support: union_count,
                    });
                }
            }
        }
    }

    Ok(rules)
}

/// Reproducible presentation order: descending confidence, then antecedent,
/// then consequent. Not a correctness property, only a display and testing
/// convention.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        OrderedFloat(b.confidence)
            .cmp(&OrderedFloat(a.confidence))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
