use thiserror::Error;

/// Failures of the aggregation pipeline. Raised eagerly; never replaced by a
/// sentinel number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("group '{key}' does not exist in the grouping domain")]
    UnknownGroupKey { key: String },

    #[error("no eligible records in {subset}")]
    EmptySubset { subset: String },

    #[error("rate of {part} over a zero whole is undefined")]
    ZeroWhole { part: usize },
}

pub type Result<T> = std::result::Result<T, StatsError>;
