use std::collections::HashMap;

/// Dense item identifier, assigned per transaction set in first-seen order.
/// `ItemId` order is the stable total order used to canonicalize itemsets.
pub type ItemId = usize;

/// A canonical itemset: item ids sorted ascending, no duplicates.
pub type Itemset = Vec<ItemId>;

/// Frequent-itemset result: canonical itemset to absolute support count,
/// restricted to counts at or above the mining threshold.
pub type ItemsetCounts = HashMap<Itemset, u32>;
