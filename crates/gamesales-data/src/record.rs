//! Typed sales records and the dataset container
//!
//! A [`Dataset`] is an ordered list of [`Record`]s together with its column
//! layout. The layout remembers which known [`Column`]s were present in the
//! source table (so later stages can tell "absent column" apart from "null
//! value") and carries unknown columns through untouched.

use std::fmt;

/// Known columns of the sales table.
///
/// Header names are the lower-case forms produced by schema normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    Platform,
    YearOfRelease,
    Genre,
    NaSales,
    EuSales,
    JpSales,
    OtherSales,
    CriticScore,
    UserScore,
    Rating,
    TotalSales,
}

impl Column {
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::Platform,
        Self::YearOfRelease,
        Self::Genre,
        Self::NaSales,
        Self::EuSales,
        Self::JpSales,
        Self::OtherSales,
        Self::CriticScore,
        Self::UserScore,
        Self::Rating,
        Self::TotalSales,
    ];

    /// Regional sales columns, in the order they are summed.
    pub const REGIONAL_SALES: [Self; 4] = [
        Self::NaSales,
        Self::EuSales,
        Self::JpSales,
        Self::OtherSales,
    ];

    /// Lower-case header name of the column.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Platform => "platform",
            Self::YearOfRelease => "year_of_release",
            Self::Genre => "genre",
            Self::NaSales => "na_sales",
            Self::EuSales => "eu_sales",
            Self::JpSales => "jp_sales",
            Self::OtherSales => "other_sales",
            Self::CriticScore => "critic_score",
            Self::UserScore => "user_score",
            Self::Rating => "rating",
            Self::TotalSales => "total_sales",
        }
    }

    /// Looks up a column by its normalized (lower-case) header name.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One slot of a dataset's column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A column with a typed home in [`Record`].
    Known(Column),
    /// A column the pipeline does not interpret, carried through verbatim.
    Extra(String),
}

impl Field {
    #[must_use]
    pub fn header(&self) -> &str {
        match self {
            Field::Known(column) => column.header(),
            Field::Extra(name) => name,
        }
    }
}

/// Borrowed component of a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart<'a> {
    Text(&'a str),
    Year(i32),
}

/// Owned identity key used by deduplication: (name, platform, genre, year).
pub type RecordKey = (Option<String>, Option<String>, Option<String>, Option<i32>);

/// One game release on one platform.
///
/// Every field is nullable; cleaning establishes which ones are guaranteed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub year_of_release: Option<i32>,
    pub genre: Option<String>,
    pub na_sales: Option<f64>,
    pub eu_sales: Option<f64>,
    pub jp_sales: Option<f64>,
    pub other_sales: Option<f64>,
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
    pub rating: Option<String>,
    pub total_sales: Option<f64>,
    /// Values of the dataset's extra columns, aligned with [`Dataset::extra_columns`].
    pub extra: Vec<Option<String>>,
}

impl Record {
    /// Numeric value of a column, or `None` for null values and text columns.
    #[must_use]
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::YearOfRelease => self.year_of_release.map(f64::from),
            Column::NaSales => self.na_sales,
            Column::EuSales => self.eu_sales,
            Column::JpSales => self.jp_sales,
            Column::OtherSales => self.other_sales,
            Column::CriticScore => self.critic_score,
            Column::UserScore => self.user_score,
            Column::TotalSales => self.total_sales,
            Column::Name | Column::Platform | Column::Genre | Column::Rating => None,
        }
    }

    /// Text value of a column, or `None` for null values and numeric columns.
    #[must_use]
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => self.name.as_deref(),
            Column::Platform => self.platform.as_deref(),
            Column::Genre => self.genre.as_deref(),
            Column::Rating => self.rating.as_deref(),
            _ => None,
        }
    }

    /// Grouping-key component for a column. Only name, platform, genre, rating
    /// and year can take part in grouping keys.
    #[must_use]
    pub fn key_part(&self, column: Column) -> Option<KeyPart<'_>> {
        match column {
            Column::YearOfRelease => self.year_of_release.map(KeyPart::Year),
            _ => self.text(column).map(KeyPart::Text),
        }
    }

    /// Identity key used to detect duplicate releases.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        (
            self.name.clone(),
            self.platform.clone(),
            self.genre.clone(),
            self.year_of_release,
        )
    }

    /// Formats a known column's value as table text; `None` for nulls.
    #[must_use]
    pub fn format_cell(&self, column: Column) -> Option<String> {
        match column {
            Column::YearOfRelease => self.year_of_release.map(|y| y.to_string()),
            Column::Name | Column::Platform | Column::Genre | Column::Rating => {
                self.text(column).map(str::to_owned)
            }
            _ => self.number(column).map(|v| v.to_string()),
        }
    }
}

/// An ordered collection of records with its column layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    layout: Vec<Field>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from a layout and records.
    ///
    /// # Panics
    ///
    /// Panics if a record's extra values do not line up with the layout's extra columns.
    #[must_use]
    pub fn new(layout: Vec<Field>, records: Vec<Record>) -> Self {
        let extra_count = layout
            .iter()
            .filter(|f| matches!(f, Field::Extra(_)))
            .count();
        assert!(
            records.iter().all(|r| r.extra.len() == extra_count),
            "record extra values must match the layout's extra columns"
        );
        Self { layout, records }
    }

    /// Creates a dataset whose layout holds exactly the given known columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamesales_data::record::{Column, Dataset, Record};
    ///
    /// let dataset = Dataset::with_columns([Column::Name, Column::Genre], vec![Record::default()]);
    /// assert!(dataset.has_column(Column::Genre));
    /// assert!(!dataset.has_column(Column::Platform));
    /// ```
    #[must_use]
    pub fn with_columns<I>(columns: I, records: Vec<Record>) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        let layout = columns.into_iter().map(Field::Known).collect();
        Self::new(layout, records)
    }

    /// Creates a dataset holding every known column except the derived `total_sales`.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::with_columns(
            Column::ALL
                .into_iter()
                .filter(|c| *c != Column::TotalSales),
            records,
        )
    }

    #[must_use]
    pub fn layout(&self) -> &[Field] {
        &self.layout
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source table carried this column.
    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        self.layout.contains(&Field::Known(column))
    }

    /// Names of the uninterpreted columns, in layout order.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.layout.iter().filter_map(|f| match f {
            Field::Extra(name) => Some(name.as_str()),
            Field::Known(_) => None,
        })
    }

    /// Keeps only the records matching `keep`, preserving order and layout.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(keep);
    }

    /// Appends a known column to the layout if it is not already there.
    pub(crate) fn ensure_column(&mut self, column: Column) {
        if !self.has_column(column) {
            self.layout.push(Field::Known(column));
        }
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    /// Appends (or replaces) an extra column with one value per record.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per record.
    pub fn set_extra_column(&mut self, name: &str, values: Vec<Option<String>>) {
        assert_eq!(values.len(), self.records.len(), "one value per record");
        let existing = self.extra_columns().position(|n| n == name);
        let index = existing.unwrap_or_else(|| {
            self.layout.push(Field::Extra(name.to_owned()));
            self.extra_columns().count() - 1
        });
        for (record, value) in self.records.iter_mut().zip(values) {
            if index < record.extra.len() {
                record.extra[index] = value;
            } else {
                record.extra.push(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_headers_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("Name"), None);
    }

    #[test]
    fn record_accessors_respect_column_kind() {
        let record = Record {
            name: Some("Tetris".to_owned()),
            year_of_release: Some(1989),
            critic_score: Some(90.0),
            ..Record::default()
        };
        assert_eq!(record.text(Column::Name), Some("Tetris"));
        assert_eq!(record.number(Column::Name), None);
        assert_eq!(record.number(Column::YearOfRelease), Some(1989.0));
        assert_eq!(record.key_part(Column::YearOfRelease), Some(KeyPart::Year(1989)));
        assert_eq!(record.key_part(Column::Platform), None);
        assert_eq!(record.format_cell(Column::CriticScore).as_deref(), Some("90"));
    }

    #[test]
    fn set_extra_column_appends_then_replaces() {
        let mut dataset = Dataset::from_records(vec![Record::default(), Record::default()]);
        dataset.set_extra_column("note", vec![Some("a".to_owned()), None]);
        assert_eq!(dataset.extra_columns().collect::<Vec<_>>(), ["note"]);
        assert_eq!(dataset.records()[0].extra, [Some("a".to_owned())]);

        dataset.set_extra_column("note", vec![None, Some("b".to_owned())]);
        assert_eq!(dataset.extra_columns().count(), 1);
        assert_eq!(dataset.records()[1].extra, [Some("b".to_owned())]);
    }
}
