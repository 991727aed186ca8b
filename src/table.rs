use chrono::NaiveDate;

/// A single value in a parsed export. `Null` is the missing-value marker:
/// empty CSV fields ingest as `Null`, and unparsable date cells degrade to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Cell {
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Null
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Output-file representation: dates as `YYYY-MM-DD`, nulls as empty.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Null => String::new(),
        }
    }
}

/// A rectangular table of cells with named columns. Every row has exactly
/// `columns.len()` cells.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Removes the named columns, together with their cells in every row.
    /// Names that are not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let mut doomed: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        doomed.sort_unstable();
        for &idx in doomed.iter().rev() {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }
}
