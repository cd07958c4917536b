use std::fmt::Display;

use crate::data::group::Grouping;
use crate::data::model::Subset;

use super::error::{Result, StatsError};

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Number of records in the view.
pub fn count(subset: &Subset<'_>) -> usize {
    subset.len()
}

/// Per-key record counts for the requested `keys`, in the order given.
///
/// A key in the grouping's domain with no rows counts as 0. A key outside
/// the domain is an [`StatsError::UnknownGroupKey`].
pub fn group_counts<K>(grouping: &Grouping<'_, K>, keys: &[K]) -> Result<Vec<(K, usize)>>
where
    K: Ord + Copy + Display,
{
    keys.iter()
        .map(|key| {
            grouping
                .get(key)
                .map(|subset| (*key, count(subset)))
                .ok_or_else(|| StatsError::UnknownGroupKey {
                    key: key.to_string(),
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Mean of the known ages and the number of rows whose age is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanAge {
    pub mean: f64,
    /// Rows excluded because their age is unknown.
    pub excluded_count: usize,
    /// Rows that contributed to the mean; never 0.
    pub known_count: usize,
}

/// Arithmetic mean of `age` over the rows where it is present.
///
/// Fails with [`StatsError::EmptySubset`] when no row has a known age;
/// `name` identifies the view in that error.
#[allow(clippy::cast_precision_loss)]
pub fn mean_age(subset: &Subset<'_>, name: &str) -> Result<MeanAge> {
    let (sum, known) = subset
        .iter()
        .filter_map(|r| r.age)
        .fold((0.0_f64, 0_usize), |(sum, n), age| (sum + age, n + 1));

    if known == 0 {
        return Err(StatsError::EmptySubset {
            subset: name.to_string(),
        });
    }

    Ok(MeanAge {
        mean: sum / known as f64,
        excluded_count: count(subset) - known,
        known_count: known,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::survived;
    use crate::data::fixtures::{passenger, scenario_table};
    use crate::data::model::{PassengerClass, PassengerTable, Sex};

    #[test]
    fn count_of_empty_view_is_zero() {
        let table = PassengerTable::default();
        assert_eq!(count(&table.all()), 0);
    }

    #[test]
    fn group_counts_follow_requested_order() {
        let table = scenario_table();
        let by_class = Grouping::observed(&table.all(), |r| r.class);
        let counts = group_counts(
            &by_class,
            &[PassengerClass::Third, PassengerClass::First],
        )
        .unwrap();
        assert_eq!(
            counts,
            vec![(PassengerClass::Third, 1), (PassengerClass::First, 2)]
        );
    }

    #[test]
    fn group_counts_distinguish_absent_from_empty() {
        let table = scenario_table();
        let survivors = table.all().filter(survived);

        let observed = Grouping::observed(&survivors, |r| r.class);
        let err = group_counts(&observed, &PassengerClass::ALL).unwrap_err();
        assert_eq!(err, StatsError::UnknownGroupKey { key: "3".into() });

        let declared = Grouping::over_domain(&survivors, |r| r.class, &PassengerClass::ALL);
        let counts = group_counts(&declared, &PassengerClass::ALL).unwrap();
        assert_eq!(counts[2], (PassengerClass::Third, 0));
    }

    #[test]
    fn mean_age_skips_missing_values() {
        let table = scenario_table();
        let survivors = table.all().filter(survived);
        let mean = mean_age(&survivors, "survivors").unwrap();
        assert_eq!(mean.mean, 30.0);
        assert_eq!(mean.excluded_count, 1);
        assert_eq!(mean.known_count, 1);
    }

    #[test]
    fn mean_age_counts_add_up_to_the_view() {
        let table = scenario_table();
        for view in [table.all(), table.all().filter(survived)] {
            let mean = mean_age(&view, "view").unwrap();
            assert_eq!(mean.known_count + mean.excluded_count, count(&view));
        }
        let all = mean_age(&table.all(), "all").unwrap();
        assert_eq!((all.known_count, all.excluded_count), (3, 1));
        assert_eq!(all.mean, 30.0);
    }

    #[test]
    fn mean_age_of_all_missing_is_an_error() {
        let table = PassengerTable::from_records(vec![
            passenger(1, true, PassengerClass::First, Sex::Male, None),
            passenger(2, true, PassengerClass::Third, Sex::Female, None),
        ]);
        let err = mean_age(&table.all(), "survivors").unwrap_err();
        assert_eq!(
            err,
            StatsError::EmptySubset {
                subset: "survivors".into()
            }
        );
    }

    #[test]
    fn mean_age_of_empty_view_is_an_error() {
        let table = scenario_table();
        let none = table.all().filter(|_| false);
        assert!(matches!(
            mean_age(&none, "nobody"),
            Err(StatsError::EmptySubset { .. })
        ));
    }
}
