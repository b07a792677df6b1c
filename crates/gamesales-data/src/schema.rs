//! Schema normalization: header standardization and type coercion
//!
//! [`normalize`] is the first stage of the cleaning pipeline. It lowercases
//! header names, binds known headers to typed [`Record`] fields and coerces
//! cell text into numbers. Malformed values (for example the `tbd` placeholder
//! found in user scores) become nulls; they are never reported as errors.
//!
//! The only failures are structural: a required column missing from the table,
//! or a known column appearing twice.

use tracing::debug;

use crate::{
    record::{Column, Dataset, Field, Record},
    table::RawTable,
};

/// Columns without which the cleaning pipeline cannot run.
pub const REQUIRED_COLUMNS: [Column; 3] = [Column::Name, Column::Genre, Column::YearOfRelease];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("required column '{column}' is missing from the input table")]
    MissingColumn { column: Column },
    #[display("column '{column}' appears more than once in the input table")]
    DuplicateColumn { column: Column },
}

/// Lowercases header names and coerces cells into a typed [`Dataset`].
///
/// Column set and row order are preserved. `year_of_release` becomes an
/// integer or null (`"2006.0"` is accepted), `user_score` and the other numeric
/// columns become floats or null.
///
/// # Errors
///
/// Returns [`SchemaError`] if a required column is absent or a known column is
/// duplicated.
///
/// # Examples
///
/// ```
/// use gamesales_data::{record::Column, schema::normalize, table::RawTable};
///
/// let raw = RawTable::from_strs(
///     &["Name", "Year_of_Release", "Genre", "User_Score"],
///     &[&["Tetris", "1989.0", "Puzzle", "tbd"]],
/// );
/// let dataset = normalize(raw).unwrap();
/// let record = &dataset.records()[0];
/// assert_eq!(record.year_of_release, Some(1989));
/// assert_eq!(record.user_score, None);
/// assert!(dataset.has_column(Column::UserScore));
/// ```
pub fn normalize(raw: RawTable) -> Result<Dataset, SchemaError> {
    let layout = raw
        .headers
        .iter()
        .map(|header| {
            let header = header.trim().to_lowercase();
            match Column::from_header(&header) {
                Some(column) => Field::Known(column),
                None => Field::Extra(header),
            }
        })
        .collect::<Vec<_>>();

    for (i, field) in layout.iter().enumerate() {
        match field {
            Field::Known(column) if layout[..i].contains(field) => {
                return Err(SchemaError::DuplicateColumn { column: *column });
            }
            _ => {}
        }
    }
    for column in REQUIRED_COLUMNS {
        if !layout.contains(&Field::Known(column)) {
            return Err(SchemaError::MissingColumn { column });
        }
    }

    let mut coerced_to_null = 0_usize;
    let records = raw
        .rows
        .into_iter()
        .map(|row| {
            let mut record = Record::default();
            let mut cells = row.into_iter();
            for field in &layout {
                let cell = cells.next().flatten();
                match field {
                    Field::Known(column) => {
                        if !assign(&mut record, *column, cell) {
                            coerced_to_null += 1;
                        }
                    }
                    Field::Extra(_) => record.extra.push(cell),
                }
            }
            record
        })
        .collect::<Vec<_>>();

    if coerced_to_null > 0 {
        debug!(cells = coerced_to_null, "coerced malformed values to null");
    }
    Ok(Dataset::new(layout, records))
}

/// Stores a cell into the record. Returns `false` if non-empty text could not
/// be parsed and was dropped.
fn assign(record: &mut Record, column: Column, cell: Option<String>) -> bool {
    let Some(text) = cell else {
        return true;
    };
    let parsed = match column {
        Column::Name => {
            record.name = Some(text);
            return true;
        }
        Column::Platform => {
            record.platform = Some(text);
            return true;
        }
        Column::Genre => {
            record.genre = Some(text);
            return true;
        }
        Column::Rating => {
            record.rating = Some(text);
            return true;
        }
        Column::YearOfRelease => {
            record.year_of_release = parse_year(&text);
            return record.year_of_release.is_some();
        }
        Column::NaSales => &mut record.na_sales,
        Column::EuSales => &mut record.eu_sales,
        Column::JpSales => &mut record.jp_sales,
        Column::OtherSales => &mut record.other_sales,
        Column::CriticScore => &mut record.critic_score,
        Column::UserScore => &mut record.user_score,
        Column::TotalSales => &mut record.total_sales,
    };
    *parsed = parse_float(&text);
    parsed.is_some()
}

/// Parses a finite float; `nan`, `inf` and non-numeric text yield `None`.
///
/// # Examples
///
/// ```
/// use gamesales_data::schema::parse_float;
///
/// assert_eq!(parse_float(" 8.5 "), Some(8.5));
/// assert_eq!(parse_float("tbd"), None);
/// assert_eq!(parse_float("nan"), None);
/// ```
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integral year; float text with a zero fractional part is accepted.
///
/// # Examples
///
/// ```
/// use gamesales_data::schema::parse_year;
///
/// assert_eq!(parse_year("2006"), Some(2006));
/// assert_eq!(parse_year("2006.0"), Some(2006));
/// assert_eq!(parse_year("2006.5"), None);
/// assert_eq!(parse_year("N/A"), None);
/// ```
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(year) = text.parse::<i32>() {
        return Some(year);
    }
    let value = parse_float(text)?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then(|| value as i32)
}
