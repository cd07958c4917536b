use std::collections::BTreeMap;

use super::model::{PassengerRecord, Subset};

// ---------------------------------------------------------------------------
// Grouping – key → Subset over an explicit key domain
// ---------------------------------------------------------------------------

/// Rows of one view grouped by a discrete key.
///
/// The key set is the grouping's *domain*. A key in the domain with no rows
/// maps to an empty subset; a key outside the domain has no entry at all.
/// Iteration follows the key's `Ord`.
#[derive(Debug, Clone)]
pub struct Grouping<'a, K> {
    groups: BTreeMap<K, Subset<'a>>,
}

impl<'a, K: Ord + Copy> Grouping<'a, K> {
    /// Group by `key_fn` over a declared domain. Every key of `domain` is
    /// present, even with zero rows. Observed keys outside `domain` are kept
    /// as well so no row is dropped.
    pub fn over_domain<F>(subset: &Subset<'a>, key_fn: F, domain: &[K]) -> Self
    where
        F: Fn(&PassengerRecord) -> K,
    {
        Self::build(subset, key_fn, domain)
    }

    fn build<F>(subset: &Subset<'a>, key_fn: F, domain: &[K]) -> Self
    where
        F: Fn(&PassengerRecord) -> K,
    {
        let table = subset.table();
        let mut buckets: BTreeMap<K, Vec<usize>> =
            domain.iter().map(|&k| (k, Vec::new())).collect();
        for &i in subset.indices() {
            buckets
                .entry(key_fn(&table.records()[i]))
                .or_default()
                .push(i);
        }
        let groups = buckets
            .into_iter()
            .map(|(k, indices)| (k, Subset::from_indices(table, indices)))
            .collect();
        Grouping { groups }
    }

    /// The rows for `key`, or `None` when `key` is outside the domain.
    pub fn get(&self, key: &K) -> Option<&Subset<'a>> {
        self.groups.get(key)
    }
}

// Report assembly always declares its domains; the observed-domain
// constructor and the map accessors back the grouping tests.
#[cfg(test)]
impl<'a, K: Ord + Copy> Grouping<'a, K> {
    /// Group by `key_fn`; the domain is exactly the keys observed in `subset`.
    pub fn observed<F>(subset: &Subset<'a>, key_fn: F) -> Self
    where
        F: Fn(&PassengerRecord) -> K,
    {
        Self::build(subset, key_fn, &[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    /// Domain keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Subset<'a>)> {
        self.groups.iter()
    }

    /// Size of the domain (not the number of rows).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}
