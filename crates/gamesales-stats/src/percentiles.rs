/// Precomputed quantile values for a dataset.
///
/// This structure stores quantile-value pairs for efficient lookup of
/// commonly used cut points (e.g. the quartiles used to tier genres).
///
/// # Examples
///
/// ```
/// use gamesales_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[0.25, 0.5, 0.75]);
///
/// assert_eq!(percentiles.get(0.5), Some(3.0));
/// assert_eq!(percentiles.get(0.25), Some(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct Percentiles {
    /// Quantile-value pairs in the order they were requested.
    /// Each tuple contains (quantile, value) where quantile is 0.0-1.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes quantiles from sorted values.
    ///
    /// Quantiles that cannot be computed (empty input) are omitted.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], quantile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let values = quantile_points
            .iter()
            .filter_map(|&q| Some((q, quantile_sorted(sorted_values, q)?)))
            .collect();
        Self { values }
    }

    /// Computes quantiles from unsorted values.
    ///
    /// This method will sort the values internally before computing quantiles.
    #[must_use]
    pub fn new(values: &[f64], quantile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, quantile_points)
    }

    /// Gets the value at a specific quantile.
    ///
    /// Returns `None` if the quantile was not precomputed.
    #[must_use]
    pub fn get(&self, quantile: f64) -> Option<f64> {
        self.values.iter().find_map(|(q, value)| {
            if (*q - quantile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }
}

/// Computes a single quantile from sorted data using linear interpolation.
///
/// For `n` values the quantile `q` sits at fractional position `q * (n - 1)`;
/// the result interpolates between the two neighbouring values. `q` is clamped
/// to `[0, 1]`.
///
/// # Returns
///
/// The interpolated value, or `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use gamesales_stats::percentiles::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&values, 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&values, 0.75), Some(3.25));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - pos.floor();
    let lo = sorted_values[lower];
    let hi = sorted_values[upper.min(last)];
    Some(lo + (hi - lo) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_endpoints() {
        let values = [1.0, 5.0, 9.0];
        assert_eq!(quantile_sorted(&values, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&values, 1.0), Some(9.0));
        assert_eq!(quantile_sorted(&values, 0.5), Some(5.0));
    }

    #[test]
    fn quantile_single_value() {
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
    }

    #[test]
    fn percentiles_lookup() {
        let percentiles = Percentiles::new(&[4.0, 3.0, 2.0, 1.0], &[0.25, 0.75]);
        assert_eq!(percentiles.get(0.25), Some(1.75));
        assert_eq!(percentiles.get(0.75), Some(3.25));
        assert_eq!(percentiles.get(0.5), None);
    }

    #[test]
    fn percentiles_of_empty_input_are_missing() {
        let percentiles = Percentiles::new(&[], &[0.5]);
        assert_eq!(percentiles.get(0.5), None);
    }
}
