use tracing::info;

use crate::{
    dedup::drop_duplicates,
    filter::drop_incomplete,
    record::Dataset,
    sales::add_total_sales,
    schema::{SchemaError, normalize},
    table::RawTable,
    year::resolve_years,
};

/// Runs the cleaning stages in their fixed order.
///
/// normalize → resolve years → drop incomplete → add total sales → drop
/// duplicates. Imputation is a separate stage; see
/// [`impute_dataset`](crate::impute::impute_dataset).
///
/// # Errors
///
/// Returns [`SchemaError`] if the table lacks a required column.
///
/// # Examples
///
/// ```
/// use gamesales_data::{pipeline::clean, table::RawTable};
///
/// let raw = RawTable::from_strs(
///     &["Name", "Platform", "Year_of_Release", "Genre", "NA_Sales"],
///     &[
///         &["FIFA 2014", "PS3", "", "Sports", "1.5"],
///         &["Mystery", "PC", "", "Puzzle", "0.1"],
///     ],
/// );
/// let cleaned = clean(raw).unwrap();
/// assert_eq!(cleaned.len(), 1);
/// assert_eq!(cleaned.records()[0].year_of_release, Some(2014));
/// assert_eq!(cleaned.records()[0].total_sales, Some(1.5));
/// ```
pub fn clean(raw: RawTable) -> Result<Dataset, SchemaError> {
    let input_rows = raw.rows.len();
    let dataset = normalize(raw)?;
    let dataset = clean_dataset(dataset);
    info!(input_rows, output_rows = dataset.len(), "cleaned dataset");
    Ok(dataset)
}

/// Runs every cleaning stage after schema normalization.
#[must_use]
pub fn clean_dataset(dataset: Dataset) -> Dataset {
    let dataset = resolve_years(dataset);
    let dataset = drop_incomplete(dataset);
    let dataset = add_total_sales(dataset);
    drop_duplicates(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Column;

    fn raw_games() -> RawTable {
        RawTable::from_strs(
            &[
                "Name",
                "Platform",
                "Year_of_Release",
                "Genre",
                "NA_Sales",
                "EU_Sales",
                "JP_Sales",
                "Other_Sales",
                "Critic_Score",
                "User_Score",
                "Rating",
            ],
            &[
                &["Game A", "PS4", "2015.0", "Action", "1.0", "0.5", "0.1", "0.1", "85", "8.5", "M"],
                &["Game B", "PC", "", "Sports", "2.0", "1.0", "0.0", "0.2", "", "tbd", ""],
                &["FIFA 2014", "XOne", "", "Sports", "0.5", "0.2", "0.0", "0.1", "70", "7.0", "E"],
                &["", "PS4", "2014.0", "", "0.1", "0.0", "0.0", "0.0", "", "", ""],
                &["Game E", "PC", "2016.0", "Action", "3.0", "1.5", "0.2", "0.3", "90", "9.0", "T"],
                &["Game E", "PC", "2016", "Action", "1.0", "", "", "", "", "", ""],
                &["Game B", "PS4", "2010", "Sports", "0.4", "0.1", "0.0", "0.0", "", "", ""],
            ],
        )
    }

    #[test]
    fn cleaned_records_are_complete_and_unique() {
        let cleaned = clean(raw_games()).unwrap();
        assert!(cleaned.has_column(Column::TotalSales));
        assert!(cleaned.records().iter().all(|r| {
            r.name.is_some() && r.genre.is_some() && r.year_of_release.is_some()
        }));
        // the nameless row goes; the lower-selling "Game E" duplicate goes
        assert_eq!(cleaned.len(), 5);
        let game_e = cleaned
            .records()
            .iter()
            .find(|r| r.name.as_deref() == Some("Game E"))
            .unwrap();
        assert!((game_e.total_sales.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn missing_years_are_recovered() {
        let cleaned = clean(raw_games()).unwrap();
        let year_of = |name: &str, platform: &str| {
            cleaned
                .records()
                .iter()
                .find(|r| r.name.as_deref() == Some(name) && r.platform.as_deref() == Some(platform))
                .and_then(|r| r.year_of_release)
        };
        assert_eq!(year_of("FIFA 2014", "XOne"), Some(2014));
        assert_eq!(year_of("Game B", "PC"), Some(2010));
    }

    #[test]
    fn total_sales_obeys_sum_law() {
        let cleaned = clean(raw_games()).unwrap();
        for record in cleaned.records() {
            let sum = record.na_sales.unwrap_or(0.0)
                + record.eu_sales.unwrap_or(0.0)
                + record.jp_sales.unwrap_or(0.0)
                + record.other_sales.unwrap_or(0.0);
            assert!((record.total_sales.unwrap() - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(raw_games()).unwrap();
        let twice = clean(once.to_raw_table()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_required_column_surfaces() {
        let raw = RawTable::from_strs(&["Name", "Year_of_Release"], &[&["Doom", "1993"]]);
        assert!(matches!(
            clean(raw),
            Err(SchemaError::MissingColumn {
                column: Column::Genre
            })
        ));
    }
}
