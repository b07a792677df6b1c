//! Release volume over time and selection of the analysis period

use std::collections::{BTreeMap, BTreeSet};

use gamesales_data::record::{Dataset, Record};
use serde::Serialize;
use tracing::debug;

/// Number of releases per year, ascending by year. Records without a year are skipped.
#[must_use]
pub fn games_per_year(records: &[Record]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year_of_release) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Years with at least `threshold` releases.
///
/// Without a threshold the mean number of releases per year is used.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::temporal::significant_years;
/// use gamesales_data::record::Record;
///
/// let release = |year| Record {
///     year_of_release: Some(year),
///     ..Record::default()
/// };
/// let records = [release(2001), release(2002), release(2002), release(2002)];
/// // the mean is 2 releases per year, so only 2002 qualifies
/// let years = significant_years(&records, None);
/// assert_eq!(years.keys().copied().collect::<Vec<_>>(), [2002]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn significant_years(records: &[Record], threshold: Option<f64>) -> BTreeMap<i32, usize> {
    let mut counts = games_per_year(records);
    if counts.is_empty() {
        return counts;
    }
    let threshold = threshold
        .unwrap_or_else(|| counts.values().sum::<usize>() as f64 / counts.len() as f64);
    counts.retain(|_, count| *count as f64 >= threshold);
    counts
}

/// Summary of the records released from `period_start` onwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookbackWindow {
    /// `"<start>-<current year>"`
    pub period: String,
    pub years: i32,
    pub games: usize,
    pub platforms: usize,
    pub total_sales: f64,
    pub avg_games_per_year: f64,
}

/// Compares candidate window sizes ending at `current_year`.
///
/// A window of `n` years covers releases from `current_year - n + 1` on.
/// Records without a year are ignored.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn evaluate_lookback_windows(
    records: &[Record],
    current_year: i32,
    windows: &[i32],
) -> Vec<LookbackWindow> {
    windows
        .iter()
        .map(|&years| {
            let start = current_year - years + 1;
            let window = records
                .iter()
                .filter(|r| r.year_of_release.is_some_and(|y| y >= start))
                .collect::<Vec<_>>();
            let platforms = window
                .iter()
                .filter_map(|r| r.platform.as_deref())
                .collect::<BTreeSet<_>>()
                .len();
            LookbackWindow {
                period: format!("{start}-{current_year}"),
                years,
                games: window.len(),
                platforms,
                total_sales: window.iter().filter_map(|r| r.total_sales).sum(),
                avg_games_per_year: window.len() as f64 / f64::from(years),
            }
        })
        .collect()
}

/// Keeps records released in `start_year` or later.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::temporal::filter_relevant_period;
/// use gamesales_data::record::{Dataset, Record};
///
/// let release = |year| Record {
///     year_of_release: year,
///     ..Record::default()
/// };
/// let dataset = Dataset::from_records(vec![release(Some(2012)), release(Some(2014)), release(None)]);
/// let recent = filter_relevant_period(dataset, 2013);
/// assert_eq!(recent.len(), 1);
/// ```
#[must_use]
pub fn filter_relevant_period(mut dataset: Dataset, start_year: i32) -> Dataset {
    let before = dataset.len();
    dataset.retain(|r| r.year_of_release.is_some_and(|y| y >= start_year));
    debug!(start_year, before, after = dataset.len(), "filtered relevant period");
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(year: Option<i32>, platform: &str, total: f64) -> Record {
        Record {
            year_of_release: year,
            platform: Some(platform.to_owned()),
            total_sales: Some(total),
            ..Record::default()
        }
    }

    fn records() -> Vec<Record> {
        vec![
            release(Some(2010), "Wii", 1.0),
            release(Some(2014), "PS4", 2.0),
            release(Some(2015), "PS4", 3.0),
            release(Some(2016), "XOne", 0.5),
            release(None, "PC", 9.0),
        ]
    }

    #[test]
    fn counts_releases_per_year() {
        let counts = games_per_year(&records());
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            [(2010, 1), (2014, 1), (2015, 1), (2016, 1)]
        );
    }

    #[test]
    fn explicit_threshold_filters_years() {
        let mut records = records();
        records.push(release(Some(2015), "PC", 0.1));
        let years = significant_years(&records, Some(2.0));
        assert_eq!(years.into_iter().collect::<Vec<_>>(), [(2015, 2)]);
        assert!(significant_years(&[], None).is_empty());
    }

    #[test]
    fn lookback_windows_summarize_recent_releases() {
        let windows = evaluate_lookback_windows(&records(), 2016, &[1, 3]);
        assert_eq!(windows.len(), 2);

        assert_eq!(windows[0].period, "2016-2016");
        assert_eq!(windows[0].games, 1);
        assert_eq!(windows[0].platforms, 1);

        assert_eq!(windows[1].period, "2014-2016");
        assert_eq!(windows[1].games, 3);
        assert_eq!(windows[1].platforms, 2);
        assert!((windows[1].total_sales - 5.5).abs() < 1e-9);
        assert!((windows[1].avg_games_per_year - 1.0).abs() < 1e-9);
    }

    #[test]
    fn relevant_period_drops_old_and_undated_records() {
        let dataset = Dataset::from_records(records());
        let recent = filter_relevant_period(dataset, 2014);
        let years = recent
            .records()
            .iter()
            .map(|r| r.year_of_release)
            .collect::<Vec<_>>();
        assert_eq!(years, [Some(2014), Some(2015), Some(2016)]);
    }
}
