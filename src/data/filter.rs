use super::model::{PassengerRecord, Sex, Subset};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

pub fn survived(record: &PassengerRecord) -> bool {
    record.survived
}

pub fn is_female(record: &PassengerRecord) -> bool {
    record.sex == Sex::Female
}

// ---------------------------------------------------------------------------
// Filtering views
// ---------------------------------------------------------------------------

impl<'a> Subset<'a> {
    /// Keep only the rows matching `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Subset<'a>
    where
        P: FnMut(&PassengerRecord) -> bool,
    {
        let records = self.table().records();
        let indices = self
            .indices()
            .iter()
            .copied()
            .filter(|&i| predicate(&records[i]))
            .collect();
        Subset::from_indices(self.table(), indices)
    }

    /// Split into (matching, non-matching). Every row lands in exactly one
    /// half.
    pub fn partition<P>(&self, mut predicate: P) -> (Subset<'a>, Subset<'a>)
    where
        P: FnMut(&PassengerRecord) -> bool,
    {
        let records = self.table().records();
        let (yes, no): (Vec<usize>, Vec<usize>) = self
            .indices()
            .iter()
            .copied()
            .partition(|&i| predicate(&records[i]));
        (
            Subset::from_indices(self.table(), yes),
            Subset::from_indices(self.table(), no),
        )
    }
}

/// Survivors and non-survivors of one view.
#[derive(Debug, Clone)]
pub struct Outcome<'a> {
    pub survivors: Subset<'a>,
    pub non_survivors: Subset<'a>,
}

/// Partition a view by the `survived` flag.
pub fn split_by_outcome<'a>(subset: &Subset<'a>) -> Outcome<'a> {
    let (survivors, non_survivors) = subset.partition(survived);
    Outcome {
        survivors,
        non_survivors,
    }
}
