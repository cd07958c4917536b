use super::error::{Result, StatsError};

/// Percentage of `part` in `whole`: `100 * part / whole`.
///
/// Not clamped or rounded. A zero `whole` is [`StatsError::ZeroWhole`].
#[allow(clippy::cast_precision_loss)]
pub fn rate(part: usize, whole: usize) -> Result<f64> {
    if whole == 0 {
        return Err(StatsError::ZeroWhole { part });
    }
    Ok(100.0 * part as f64 / whole as f64)
}

/// Shares of two mutually exclusive counts in their total `a + b`.
pub fn combined_rate(a: usize, b: usize) -> Result<(f64, f64)> {
    let whole = a + b;
    if whole == 0 {
        return Err(StatsError::ZeroWhole { part: a });
    }
    Ok((rate(a, whole)?, rate(b, whole)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_percentage_of_whole() {
        assert_eq!(rate(4, 10).unwrap(), 40.0);
        assert_eq!(rate(0, 7).unwrap(), 0.0);
        assert_eq!(rate(7, 7).unwrap(), 100.0);
    }

    #[test]
    fn rate_stays_within_bounds_for_parts_of_the_whole() {
        for whole in 1..=25 {
            for part in 0..=whole {
                let r = rate(part, whole).unwrap();
                assert!((0.0..=100.0).contains(&r), "{part}/{whole} -> {r}");
            }
        }
    }

    #[test]
    fn rate_is_not_clamped() {
        assert_eq!(rate(3, 2).unwrap(), 150.0);
    }

    #[test]
    fn zero_whole_is_an_error() {
        for part in [0, 1, 42] {
            assert_eq!(rate(part, 0), Err(StatsError::ZeroWhole { part }));
        }
    }

    #[test]
    fn combined_rate_splits_total() {
        let (a, b) = combined_rate(1, 3).unwrap();
        assert_eq!(a, 25.0);
        assert_eq!(b, 75.0);
        assert!((a + b - 100.0).abs() < 1e-9);
    }

    #[test]
    fn combined_rate_of_nothing_is_an_error() {
        assert_eq!(combined_rate(0, 0), Err(StatsError::ZeroWhole { part: 0 }));
    }
}
