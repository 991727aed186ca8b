use crate::error::{CleanerError, Result};
use crate::table::{Cell, Table};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads the raw bytes once and tries each configured encoding in order,
/// returning the first decoding that succeeds without replacement errors
/// together with the matching encoding name. A leading BOM is honored.
pub fn decode_file(path: &Path, encodings: &[String]) -> Result<(String, &'static str)> {
    let bytes = fs::read(path)?;

    for label in encodings {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            warn!("Unknown encoding label '{}' in config, skipping", label);
            continue;
        };
        let (text, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            debug!("Decoding as {} failed, trying next", used.name());
            continue;
        }
        return Ok((text.into_owned(), used.name()));
    }

    Err(CleanerError::Encoding {
        path: path.display().to_string(),
        tried: encodings.join(", "),
    })
}

/// Reads a semicolon-delimited raw export into a `Table`.
pub fn read_csv(path: &Path, encodings: &[String]) -> Result<Table> {
    let (text, encoding) = decode_file(path, encodings)?;
    debug!(encoding, "Decoded raw export");
    parse_table(&text)
}

/// Parses decoded export text. Hand-edited exports show up with ragged
/// rows, so short rows are padded with nulls and long ones truncated.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();
    let mut table = Table::new(headers);

    for record in rdr.records() {
        let record = record?;
        let mut row: Vec<Cell> = record.iter().take(width).map(Cell::from_field).collect();
        row.resize(width, Cell::Null);
        table.push_row(row);
    }

    Ok(table)
}
