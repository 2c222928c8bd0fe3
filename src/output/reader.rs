//! Reader for uploaded delimited-text files

use crate::output::Table;
use crate::{OutputError, OutputResult};
use std::path::Path;

/// Picks the field delimiter for an uploaded file from its extension
///
/// Returns `None` for files that are not delimited text.
pub fn delimiter_for_filename(filename: &str) -> Option<u8> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();

    match extension.as_str() {
        "csv" => Some(b','),
        "tsv" => Some(b'\t'),
        _ => None,
    }
}

/// Parses delimited text with a mandatory header row into a table
///
/// Rows must all have the header's width. Repeated header names are made
/// unique and numeric columns are typed.
pub fn read_delimited(bytes: &[u8], delimiter: u8) -> OutputResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(OutputError::InvalidInput(
            "No columns to parse from file".to_string(),
        ));
    }

    let mut table = Table::new(headers).with_inferred_types();
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect())?;
    }

    Ok(table)
}
