//! Untyped tabular input and output
//!
//! [`RawTable`] is the loosely-typed form a dataset takes at the file
//! boundary: header names as written and every cell as optional text. Schema
//! normalization turns it into a typed [`Dataset`]; [`Dataset::to_raw_table`]
//! goes the other way for writing.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};

use crate::record::{Dataset, Field};

/// Header row plus text cells. Empty cells are represented as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Builds a table from string slices; empty strings become `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamesales_data::table::RawTable;
    ///
    /// let table = RawTable::from_strs(&["Name", "Genre"], &[&["Tetris", ""]]);
    /// assert_eq!(table.rows[0], [Some("Tetris".to_owned()), None]);
    /// ```
    #[must_use]
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| non_empty(cell)).collect())
                .collect(),
        }
    }

    /// Reads a CSV document with a header row.
    ///
    /// Rows may have fewer or more cells than the header; short rows are
    /// padded with nulls and surplus cells are ignored.
    pub fn from_csv_reader<R>(reader: R) -> Result<Self, csv::Error>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let mut rows = vec![];
        for record in reader.records() {
            let record = record?;
            let row = (0..headers.len())
                .map(|i| record.get(i).and_then(non_empty))
                .collect();
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// Reads a CSV file from disk.
    pub fn read_csv<P>(path: P) -> Result<Self, csv::Error>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Writes the table as CSV; nulls become empty cells.
    pub fn write_csv_to<W>(&self, writer: W) -> Result<(), csv::Error>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table to a CSV file, creating parent directories as needed.
    pub fn write_csv<P>(&self, path: P) -> Result<(), csv::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write_csv_to(BufWriter::new(file))
    }
}

fn non_empty(cell: &str) -> Option<String> {
    (!cell.is_empty()).then(|| cell.to_owned())
}

impl Dataset {
    /// Renders the dataset back into text cells, in layout order.
    #[must_use]
    pub fn to_raw_table(&self) -> RawTable {
        let headers = self
            .layout()
            .iter()
            .map(|f| f.header().to_owned())
            .collect();
        let rows = self
            .records()
            .iter()
            .map(|record| {
                let mut extra = record.extra.iter();
                self.layout()
                    .iter()
                    .map(|field| match field {
                        Field::Known(column) => record.format_cell(*column),
                        Field::Extra(_) => extra.next().cloned().flatten(),
                    })
                    .collect()
            })
            .collect();
        RawTable { headers, rows }
    }
}
