//! Release-year recovery for records with a missing year
//!
//! Two passes run in order:
//!
//! 1. **Title heuristic** ([`year_from_title`]): many titles embed their year
//!    ("FIFA 2014", "Madden NFL 06"). A missing (or zero) year is taken from the
//!    title when a suitable numeric token exists.
//! 2. **Cross-platform consensus**: the same game usually appears on several
//!    platforms. After pass 1, each title's most common known year is computed
//!    once over the whole dataset and assigned to that title's remaining gaps.
//!
//! Records still without a year are left alone; the row filter drops them.

use std::collections::HashMap;

use gamesales_stats::mode::mode;
use tracing::debug;

use crate::record::Dataset;

/// Extracts a release year from a game title.
///
/// The title is split on whitespace. The first all-digit token of length 4 is
/// used verbatim. Failing that, the first all-digit token of length 2 is
/// expanded: values below 20 map to 20xx, the rest to 19xx. A token that would
/// yield year 0 is ignored.
///
/// # Examples
///
/// ```
/// use gamesales_data::year::year_from_title;
///
/// assert_eq!(year_from_title("FIFA 2014"), Some(2014));
/// assert_eq!(year_from_title("NBA Live 99"), Some(1999));
/// assert_eq!(year_from_title("Madden NFL 05"), Some(2005));
/// assert_eq!(year_from_title("Super Mario Bros."), None);
/// ```
#[must_use]
pub fn year_from_title(title: &str) -> Option<i32> {
    let numeric_token = |len: usize| {
        title
            .split_whitespace()
            .find(|token| token.len() == len && token.bytes().all(|b| b.is_ascii_digit()))
    };

    if let Some(token) = numeric_token(4) {
        return token.parse::<i32>().ok().filter(|year| *year != 0);
    }
    let token = numeric_token(2)?;
    let short = token.parse::<i32>().ok()?;
    Some(if short < 20 { 2000 + short } else { 1900 + short })
}

/// Fills missing release years from titles, then from same-title records.
///
/// A year of `0` counts as missing and never survives this stage.
///
/// # Examples
///
/// ```
/// use gamesales_data::{record::{Dataset, Record}, year::resolve_years};
///
/// let record = |name: &str, platform: &str, year| Record {
///     name: Some(name.to_owned()),
///     platform: Some(platform.to_owned()),
///     year_of_release: year,
///     ..Record::default()
/// };
/// let dataset = Dataset::from_records(vec![
///     record("Tetris", "GB", Some(1989)),
///     record("Tetris", "NES", None),
/// ]);
/// let resolved = resolve_years(dataset);
/// assert_eq!(resolved.records()[1].year_of_release, Some(1989));
/// ```
#[must_use]
pub fn resolve_years(mut dataset: Dataset) -> Dataset {
    let mut from_title = 0_usize;
    for record in dataset.records_mut() {
        if matches!(record.year_of_release, None | Some(0)) {
            record.year_of_release = record.name.as_deref().and_then(year_from_title);
            from_title += usize::from(record.year_of_release.is_some());
        }
    }

    let year_by_title = consensus_years(&dataset);
    let mut from_consensus = 0_usize;
    for record in dataset.records_mut() {
        if record.year_of_release.is_some() {
            continue;
        }
        let consensus = record
            .name
            .as_deref()
            .and_then(|name| year_by_title.get(name).copied());
        if consensus.is_some() {
            record.year_of_release = consensus;
            from_consensus += 1;
        }
    }

    debug!(from_title, from_consensus, "resolved missing release years");
    dataset
}

/// Most common known year per title (ties go to the earliest year).
fn consensus_years(dataset: &Dataset) -> HashMap<String, i32> {
    let mut years_by_title: HashMap<&str, Vec<i32>> = HashMap::new();
    for record in dataset.records() {
        if let (Some(name), Some(year)) = (record.name.as_deref(), record.year_of_release) {
            years_by_title.entry(name).or_default().push(year);
        }
    }
    years_by_title
        .into_iter()
        .filter_map(|(name, years)| Some((name.to_owned(), mode(years)?)))
        .collect()
}
