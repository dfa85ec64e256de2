use std::collections::HashMap;

use crate::error::Error;
use crate::types::{ItemId, Itemset};

/// One transaction: an external identifier plus the sorted, deduplicated
/// ids of the items it contains. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: String,
    items: Itemset,
}

impl Transaction {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}

/// Immutable in-memory transaction database plus its derived item universe.
///
/// Item names are interned to dense ids in first-seen order; every id
/// referenced by a transaction is in the universe by construction. Miners
/// take a shared reference and own nothing of the caller's state.
#[derive(Debug, Clone)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
    names: Vec<String>,
    ids: HashMap<String, ItemId>,
}

impl TransactionSet {
    /// Build a transaction set from loader records of (transaction id, item
    /// names). Duplicate items within one record collapse to membership.
    ///
    /// Rejects an empty record list: mining over zero transactions is a
    /// caller error, not a degenerate result.
    pub fn new<S>(records: Vec<(S, Vec<S>)>) -> Result<Self, Error>
    where
        S: Into<String>,
    {
        if records.is_empty() {
            return Err(Error::EmptyTransactions);
        }

        let mut names: Vec<String> = Vec::new();
        let mut ids: HashMap<String, ItemId> = HashMap::new();

        let transactions = records
            .into_iter()
            .map(|(id, raw_items)| {
                let mut items: Itemset = Vec::with_capacity(raw_items.len());
                for name in raw_items {
                    let name = name.into();
                    let item_id = match ids.get(&name).copied() {
                        Some(item_id) => item_id,
                        None => {
                            let item_id = names.len();
                            names.push(name.clone());
                            ids.insert(name, item_id);
                            item_id
                        }
                    };
                    if !items.contains(&item_id) {
                        items.push(item_id);
                    }
                }
                items.sort_unstable();

                Transaction {
                    id: id.into(),
                    items,
                }
            })
            .collect();

        Ok(TransactionSet {
            transactions,
            names,
            ids,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of transactions. Always > 0.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of distinct items across all transactions.
    pub fn num_items(&self) -> usize {
        self.names.len()
    }

    /// The item universe, as the full range of interned ids.
    pub fn universe(&self) -> impl Iterator<Item = ItemId> {
        0..self.names.len()
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.ids.get(name).copied()
    }

    pub fn item_name(&self, item: ItemId) -> &str {
        &self.names[item]
    }

    /// Convert a user-facing support percentage (0-100) into the absolute
    /// minimum-frequency count `floor(percentage / 100 * total)`.
    pub fn min_frequency_for(&self, support_percentage: f64) -> u32 {
        (support_percentage / 100.0 * self.len() as f64).floor() as u32
    }
}
