use tracing::debug;

use crate::record::Dataset;

/// Drops records lacking a name, genre or release year.
///
/// Surviving records keep their relative order. No other field is inspected.
///
/// # Examples
///
/// ```
/// use gamesales_data::{filter::drop_incomplete, record::{Dataset, Record}};
///
/// let complete = Record {
///     name: Some("Doom".to_owned()),
///     genre: Some("Shooter".to_owned()),
///     year_of_release: Some(1993),
///     ..Record::default()
/// };
/// let dataset = Dataset::from_records(vec![complete.clone(), Record::default()]);
/// assert_eq!(drop_incomplete(dataset).records(), [complete]);
/// ```
#[must_use]
pub fn drop_incomplete(mut dataset: Dataset) -> Dataset {
    let before = dataset.len();
    dataset.retain(|r| r.name.is_some() && r.genre.is_some() && r.year_of_release.is_some());
    debug!(dropped = before - dataset.len(), "dropped incomplete records");
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn record(name: Option<&str>, genre: Option<&str>, year: Option<i32>) -> Record {
        Record {
            name: name.map(str::to_owned),
            genre: genre.map(str::to_owned),
            year_of_release: year,
            ..Record::default()
        }
    }

    #[test]
    fn keeps_only_complete_records_in_order() {
        let dataset = Dataset::from_records(vec![
            record(Some("B"), Some("Action"), Some(2001)),
            record(None, Some("Action"), Some(2001)),
            record(Some("C"), None, Some(2001)),
            record(Some("D"), Some("Puzzle"), None),
            record(Some("A"), Some("Racing"), Some(1999)),
        ]);
        let filtered = drop_incomplete(dataset);
        let names = filtered
            .records()
            .iter()
            .map(|r| r.name.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(names, [Some("B"), Some("A")]);
    }

    #[test]
    fn other_nulls_do_not_matter() {
        let dataset = Dataset::from_records(vec![record(Some("A"), Some("Racing"), Some(1999))]);
        assert_eq!(drop_incomplete(dataset).len(), 1);
    }
}
