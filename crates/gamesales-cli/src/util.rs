use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use gamesales_data::table::RawTable;

/// Read and deserialize a JSON file
///
/// `file_kind` names the file in error messages ("config", "report", ...).
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Serialize a value as pretty-printed JSON, creating parent directories
pub fn write_json_file<T, P>(file_kind: &str, value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    create_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create {file_kind} file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {file_kind} JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush {file_kind} file: {}", path.display()))?;
    Ok(())
}

/// Read a sales table from a CSV file
///
/// # Errors
///
/// Returns error if the file does not exist or is not valid CSV
pub fn read_csv_file<P>(file_kind: &str, path: P) -> anyhow::Result<RawTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    anyhow::ensure!(
        path.exists(),
        "{file_kind} dataset not found: {}",
        path.display()
    );
    RawTable::read_csv(path)
        .with_context(|| format!("Failed to read {file_kind} CSV file: {}", path.display()))
}

/// Write a sales table to a CSV file, creating parent directories
pub fn write_csv_file<P>(table: &RawTable, path: P) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    table
        .write_csv(path)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
