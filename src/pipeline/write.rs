use crate::error::{CleanerError, Result};
use crate::table::{Cell, Table};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

// utf-8-sig: the dashboard tool needs the BOM to pick the right encoding
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Serializes the cleaned table: comma-delimited, every field quoted, CRLF
/// records, dates as `YYYY-MM-DD`, nulls as empty fields.
///
/// The table is written to a temporary file next to the destination and
/// renamed into place afterwards, so a failed run leaves the previous
/// cleaned file intact.
pub fn write_csv(table: &Table, dest: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| CleanerError::Write {
        path: dest.display().to_string(),
        source,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp = dest.with_extension("csv.tmp");
    let file = File::create(&tmp).map_err(write_err)?;
    let mut buffered = BufWriter::new(file);
    buffered.write_all(UTF8_BOM).map_err(write_err)?;

    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(buffered);

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::render))?;
    }
    writer.flush().map_err(write_err)?;
    drop(writer);

    fs::rename(&tmp, dest).map_err(write_err)?;
    Ok(())
}
