use crate::error::{CleanerError, Result};
use crate::table::Table;

/// Fails fast with the full list of absent headers. Runs before any
/// transformation so a truncated or foreign export never half-processes.
pub fn require_columns(table: &Table, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CleanerError::MissingColumns(missing))
    }
}
