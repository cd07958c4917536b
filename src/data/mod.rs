/// Data layer: passenger types, loading, filtering and grouping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → PassengerTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PassengerTable │  Vec<PassengerRecord>, read-only
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  predicates → Subset (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  group    │  key function + domain → Grouping
///   └──────────┘
/// ```

pub mod filter;
pub mod group;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;
