use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

use crate::dataset::TransactionSet;
use crate::error::Error;
use crate::miners::{validate_min_frequency, Miner};
use crate::types::{ItemId, ItemsetCounts, Itemset};

/// Compact-structure mining without candidate generation.
///
/// Transactions are compressed into a prefix tree whose paths share common
/// item sequences; mining recurses over per-item conditional trees instead
/// of rescanning the dataset. Support counts come from tree node counts and
/// must match the other miners exactly.
pub struct FpGrowthMiner;

impl Miner for FpGrowthMiner {
    fn name(&self) -> &'static str {
        "fp-growth"
    }

    fn mine(
        &self,
        dataset: &TransactionSet,
        min_frequency: u32,
    ) -> Result<ItemsetCounts, Error> {
        validate_min_frequency(min_frequency)?;

        let weighted: Vec<(Itemset, u32)> = dataset
            .transactions()
            .iter()
            .map(|transaction| (transaction.items().to_vec(), 1))
            .collect();

        let tree = FpTree::build(&weighted, min_frequency);
        debug!(
            "fp-tree: {} nodes over {} frequent items",
            tree.nodes.len() - 1,
            tree.items.len()
        );

        let mut frequent = ItemsetCounts::new();
        mine_tree(&tree, &[], min_frequency, &mut frequent);
        Ok(frequent)
    }
}

type NodeId = usize;

const ROOT: NodeId = 0;

struct FpNode {
    item: ItemId,
    count: u32,
    parent: NodeId,
    children: Vec<(ItemId, NodeId)>,
}

/// Prefix tree over the frequent items of a (possibly conditional) set of
/// weighted transactions.
///
/// Nodes live in an arena addressed by index; the header table maps each
/// surviving item to all nodes carrying it, so mining never rescans the
/// transactions. Child links point down the tree, parent indices point back
/// up, keeping ownership acyclic.
struct FpTree {
    nodes: Vec<FpNode>,
    header: HashMap<ItemId, Vec<NodeId>>,
    /// Surviving items with their total support, ordered by descending
    /// support then ascending id: the insertion order of every path.
    items: Vec<(ItemId, u32)>,
}

impl FpTree {
    fn build(transactions: &[(Itemset, u32)], min_frequency: u32) -> FpTree {
        let mut counts: HashMap<ItemId, u32> = HashMap::new();
        for (items, weight) in transactions {
            for &item in items {
                *counts.entry(item).or_insert(0) += weight;
            }
        }
        counts.retain(|_, &mut count| count >= min_frequency);

        let mut items: Vec<(ItemId, u32)> = counts.iter().map(|(&i, &c)| (i, c)).collect();
        items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let rank: HashMap<ItemId, usize> = items
            .iter()
            .enumerate()
            .map(|(position, &(item, _))| (item, position))
            .collect();

        let mut tree = FpTree {
            nodes: vec![FpNode {
                item: ItemId::max_value(),
                count: 0,
                parent: ROOT,
                children: Vec::new(),
            }],
            header: HashMap::new(),
            items,
        };

        for (transaction, weight) in transactions {
            let mut path: Vec<ItemId> = transaction
                .iter()
                .copied()
                .filter(|item| rank.contains_key(item))
                .collect();
            path.sort_unstable_by_key(|item| rank[item]);
            tree.insert(&path, *weight);
        }

        tree
    }

    fn insert(&mut self, path: &[ItemId], weight: u32) {
        let mut node = ROOT;
        for &item in path {
            let existing = self.nodes[node]
                .children
                .iter()
                .find(|&&(child_item, _)| child_item == item)
                .map(|&(_, child)| child);

            node = match existing {
                Some(child) => {
                    self.nodes[child].count += weight;
                    child
                }
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode {
                        item,
                        count: weight,
                        parent: node,
                        children: Vec::new(),
                    });
                    self.nodes[node].children.push((item, child));
                    self.header.entry(item).or_insert_with(Vec::new).push(child);
                    child
                }
            };
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// If every node has at most one child, the single root-to-leaf path
    /// with per-node counts; `None` once the tree branches.
    fn single_path(&self) -> Option<Vec<(ItemId, u32)>> {
        let mut path = Vec::new();
        let mut node = ROOT;
        loop {
            match self.nodes[node].children.as_slice() {
                [] => return Some(path),
                &[(item, child)] => {
                    path.push((item, self.nodes[child].count));
                    node = child;
                }
                _ => return None,
            }
        }
    }

    /// The conditional pattern base of `item`: for every node carrying it,
    /// the path from the root down to (excluding) that node, weighted by the
    /// node's count.
    fn pattern_base(&self, item: ItemId) -> Vec<(Itemset, u32)> {
        let node_ids = self
            .header
            .get(&item)
            .unwrap_or_else(|| panic!("fp-tree header has no entry for item {}", item));

        node_ids
            .iter()
            .map(|&node_id| {
                let mut prefix = Vec::new();
                let mut node = self.nodes[node_id].parent;
                while node != ROOT {
                    prefix.push(self.nodes[node].item);
                    node = self.nodes[node].parent;
                }
                prefix.reverse();
                (prefix, self.nodes[node_id].count)
            })
            .collect()
    }
}

/// Recursively mine `tree`, emitting every itemset `prefix ∪ s` where `s` is
/// a frequent combination inside the tree.
fn mine_tree(tree: &FpTree, prefix: &[ItemId], min_frequency: u32, out: &mut ItemsetCounts) {
    if let Some(path) = tree.single_path() {
        // All sub-combinations of a single path, each supported by the
        // smallest count among its chosen nodes.
        for size in 1..=path.len() {
            for combination in path.iter().combinations(size) {
                let count = combination.iter().map(|&&(_, count)| count).min().unwrap();
                let items = combination.iter().map(|&&(item, _)| item);
                emit(prefix, items, count, out);
            }
        }
        return;
    }

    // Least-frequent-first, so each conditional tree only contains items
    // still ahead in the ordering.
    for &(item, support) in tree.items.iter().rev() {
        emit(prefix, std::iter::once(item), support, out);

        let base = tree.pattern_base(item);
        let conditional = FpTree::build(&base, min_frequency);
        if !conditional.is_empty() {
            let mut extended = prefix.to_vec();
            extended.push(item);
            mine_tree(&conditional, &extended, min_frequency, out);
        }
    }
}

fn emit(
    prefix: &[ItemId],
    items: impl Iterator<Item = ItemId>,
    count: u32,
    out: &mut ItemsetCounts,
) {
    let mut itemset: Itemset = prefix.iter().copied().chain(items).collect();
    itemset.sort_unstable();
    let previous = out.insert(itemset, count);
    debug_assert!(previous.is_none(), "fp-growth emitted an itemset twice");
}
