use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Summary – ordered label → value mapping handed to presentation
// ---------------------------------------------------------------------------

/// Labels in insertion order, each with one value.
///
/// The value type is shared by every entry, so a summary holds either counts
/// (`Summary<usize>`) or rates (`Summary<f64>`), never a mix.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Summary<V> {
    fn default() -> Self {
        Summary {
            entries: Vec::new(),
        }
    }
}

impl<V> Summary<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label`, or overwrite its value in place if already present.
    pub fn insert(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<L: Into<String>, V> FromIterator<(L, V)> for Summary<V> {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut summary = Summary::new();
        for (label, value) in iter {
            summary.insert(label, value);
        }
        summary
    }
}

impl Summary<usize> {
    /// Convert counts for charting.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Summary<f64> {
        self.iter().map(|(l, &v)| (l, v as f64)).collect()
    }
}

impl<V> Index<&str> for Summary<V> {
    type Output = V;

    /// Panics if `label` is not present.
    fn index(&self, label: &str) -> &V {
        match self.get(label) {
            Some(v) => v,
            None => panic!("no entry labelled '{label}' in summary"),
        }
    }
}

// Serialised as a JSON object whose keys keep insertion order.
impl<V: Serialize> Serialize for Summary<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
