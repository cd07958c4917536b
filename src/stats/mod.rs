/// Reporting core: aggregates, rates and assembled summaries.
///
/// ```text
///   Subset / Grouping
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count, group_counts, mean_age
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │   rate     │  part / whole → percentage
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  report    │  Summary / PassengerReport for presentation
///   └───────────┘
/// ```
///
/// Nothing here performs I/O; every function borrows its inputs.

pub mod aggregate;
pub mod error;
pub mod rate;
pub mod report;
pub mod summary;

pub use report::assemble;
pub use summary::Summary;
