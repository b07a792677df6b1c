use std::collections::HashSet;

use tracing::debug;

use crate::{
    record::{Column, Dataset},
    sales::add_total_sales,
};

/// Collapses duplicate (name, platform, genre, year) records.
///
/// Records are stable-sorted by descending `total_sales` (original row order
/// breaks ties) and the first record of each key is kept, so every key
/// retains its best-selling variant. The output stays in that sorted order;
/// callers must not rely on it.
///
/// If the dataset has no `total_sales` column, or any record lacks a total,
/// totals are (re)computed from regional sales first.
///
/// # Examples
///
/// ```
/// use gamesales_data::{dedup::drop_duplicates, record::{Dataset, Record}};
///
/// let release = |na| Record {
///     name: Some("Doom".to_owned()),
///     platform: Some("PC".to_owned()),
///     genre: Some("Shooter".to_owned()),
///     year_of_release: Some(1993),
///     na_sales: Some(na),
///     ..Record::default()
/// };
/// let dataset = Dataset::from_records(vec![release(1.0), release(2.0)]);
/// let deduped = drop_duplicates(dataset);
/// assert_eq!(deduped.len(), 1);
/// assert_eq!(deduped.records()[0].total_sales, Some(2.0));
/// ```
#[must_use]
pub fn drop_duplicates(dataset: Dataset) -> Dataset {
    let mut dataset = if dataset.has_column(Column::TotalSales)
        && dataset.records().iter().all(|r| r.total_sales.is_some())
    {
        dataset
    } else {
        add_total_sales(dataset)
    };

    let before = dataset.len();
    let records = dataset.records_mut();
    records.sort_by(|a, b| {
        let a = a.total_sales.unwrap_or(0.0);
        let b = b.total_sales.unwrap_or(0.0);
        b.total_cmp(&a)
    });
    let mut seen = HashSet::new();
    records.retain(|record| seen.insert(record.key()));

    debug!(dropped = before - dataset.len(), "dropped duplicate records");
    dataset
}
