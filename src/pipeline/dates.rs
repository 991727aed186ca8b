use crate::table::{Cell, Table};
use chrono::{NaiveDate, NaiveDateTime};

// Day-before-month formats are tried first: the ticketing tool exports
// French-locale dates, so "01/02/2024" means the 1st of February.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
];

/// Indices of columns whose header contains any of the keywords,
/// case-insensitively.
pub fn date_columns(columns: &[String], keywords: &[String]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            let lower = name.to_lowercase();
            keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Best-effort parse of a single cell value. Time-of-day is dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}

/// Coerces every date-like column in place. A cell that fails to parse
/// becomes `Null` rather than an error, so one bad value never aborts a
/// run. Non-matching columns are untouched.
pub fn coerce_dates(table: &mut Table, keywords: &[String]) {
    for idx in date_columns(&table.columns, keywords) {
        for row in &mut table.rows {
            row[idx] = match &row[idx] {
                Cell::Text(raw) => match parse_date(raw) {
                    Some(date) => Cell::Date(date),
                    None => Cell::Null,
                },
                Cell::Date(date) => Cell::Date(*date),
                Cell::Null => Cell::Null,
            };
        }
    }
}
