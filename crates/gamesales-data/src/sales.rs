use crate::record::{Column, Dataset, Record};

/// Sum of the four regional sales figures, counting nulls as zero.
///
/// # Examples
///
/// ```
/// use gamesales_data::{record::Record, sales::total_sales};
///
/// let record = Record {
///     na_sales: Some(1.0),
///     eu_sales: Some(0.5),
///     jp_sales: None,
///     other_sales: Some(0.25),
///     ..Record::default()
/// };
/// assert_eq!(total_sales(&record), 1.75);
/// ```
#[must_use]
pub fn total_sales(record: &Record) -> f64 {
    Column::REGIONAL_SALES
        .into_iter()
        .filter_map(|column| record.number(column))
        .sum()
}

/// Sets `total_sales` on every record, overwriting any previous value.
///
/// The column is appended to the layout if the source did not have it. No
/// records are added or removed.
#[must_use]
pub fn add_total_sales(mut dataset: Dataset) -> Dataset {
    dataset.ensure_column(Column::TotalSales);
    for record in dataset.records_mut() {
        record.total_sales = Some(total_sales(record));
    }
    dataset
}
