use thiserror::Error;

/// Input errors rejected before any mining work starts.
///
/// Internal invariant violations (an antecedent missing from a frequent
/// itemset result, an FP-tree header out of sync with its nodes) are bugs,
/// not inputs, and panic instead of being reported here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("transaction set is empty")]
    EmptyTransactions,

    #[error("minimum frequency must be at least 1")]
    ZeroMinFrequency,

    #[error("minimum confidence must be within [0, 1], got {0}")]
    InvalidMinConfidence(f64),
}
