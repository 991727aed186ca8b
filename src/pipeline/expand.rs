use crate::config::ColumnNames;
use crate::error::{CleanerError, Result};
use crate::pipeline::normalize::normalize_name;
use crate::table::{Cell, Table};

/// Turns one-ticket-per-row into one-(ticket, technician)-per-row.
///
/// The raw technicians cell holds newline-separated names. Each non-blank
/// line becomes its own output row with every other field duplicated; a
/// ticket with no technician still yields exactly one row with a null
/// `Technicien`, so unassigned tickets stay visible in the dashboard.
/// The requester is normalized in place. Both raw source columns are
/// dropped once the derived columns exist.
pub fn expand_rows(table: Table, columns: &ColumnNames) -> Result<Table> {
    let tech_idx = table
        .column_index(&columns.technicians)
        .ok_or_else(|| CleanerError::MissingColumns(vec![columns.technicians.clone()]))?;
    let requester_idx = table
        .column_index(&columns.requester)
        .ok_or_else(|| CleanerError::MissingColumns(vec![columns.requester.clone()]))?;

    let mut expanded = Table::new(table.columns.clone());
    expanded.columns.push(columns.technician_out.clone());
    expanded.columns.push(columns.requester_out.clone());

    for row in &table.rows {
        let requester = match &row[requester_idx] {
            Cell::Text(raw) => Cell::Text(normalize_name(raw)),
            _ => Cell::Null,
        };

        let technicians: Vec<String> = match &row[tech_idx] {
            Cell::Text(raw) => raw
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(normalize_name)
                .collect(),
            _ => Vec::new(),
        };

        if technicians.is_empty() {
            let mut out = row.clone();
            out.push(Cell::Null);
            out.push(requester.clone());
            expanded.push_row(out);
        } else {
            for tech in technicians {
                let mut out = row.clone();
                out.push(Cell::Text(tech));
                out.push(requester.clone());
                expanded.push_row(out);
            }
        }
    }

    expanded.drop_columns(&[columns.technicians.as_str(), columns.requester.as_str()]);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_table(technicians: Cell, requester: Cell) -> Table {
        let mut table = Table::new(vec![
            "ID".into(),
            "Titre".into(),
            "Attribué à - Technicien".into(),
            "Demandeur - Demandeur".into(),
        ]);
        table.push_row(vec![
            Cell::Text("42".into()),
            Cell::Text("Écran noir".into()),
            technicians,
            requester,
        ]);
        table
    }

    #[test]
    fn test_one_row_per_technician_line() {
        let table = ticket_table(
            Cell::Text("Jean Jean Dupont\nMarie Curie\n\nPaul Valéry".into()),
            Cell::Text("Luc Besson".into()),
        );
        let expanded = expand_rows(table, &ColumnNames::default()).unwrap();

        assert_eq!(expanded.rows.len(), 3);
        let tech_idx = expanded.column_index("Technicien").unwrap();
        assert_eq!(expanded.rows[0][tech_idx], Cell::Text("Jean Dupont".into()));
        assert_eq!(expanded.rows[1][tech_idx], Cell::Text("Marie Curie".into()));
        assert_eq!(expanded.rows[2][tech_idx], Cell::Text("Paul Valéry".into()));
    }

    #[test]
    fn test_unassigned_ticket_keeps_one_null_row() {
        let expanded = expand_rows(
            ticket_table(Cell::Null, Cell::Text("Luc Besson".into())),
            &ColumnNames::default(),
        )
        .unwrap();

        assert_eq!(expanded.rows.len(), 1);
        let tech_idx = expanded.column_index("Technicien").unwrap();
        assert_eq!(expanded.rows[0][tech_idx], Cell::Null);
    }

    #[test]
    fn test_blank_lines_only_counts_as_unassigned() {
        let expanded = expand_rows(
            ticket_table(Cell::Text("\n  \n".into()), Cell::Null),
            &ColumnNames::default(),
        )
        .unwrap();

        assert_eq!(expanded.rows.len(), 1);
        let tech_idx = expanded.column_index("Technicien").unwrap();
        assert_eq!(expanded.rows[0][tech_idx], Cell::Null);
    }

    #[test]
    fn test_raw_source_columns_are_dropped() {
        let expanded = expand_rows(
            ticket_table(Cell::Text("Jean Dupont".into()), Cell::Text("Luc".into())),
            &ColumnNames::default(),
        )
        .unwrap();

        assert!(expanded.column_index("Attribué à - Technicien").is_none());
        assert!(expanded.column_index("Demandeur - Demandeur").is_none());
        assert_eq!(
            expanded.columns,
            vec!["ID", "Titre", "Technicien", "Demandeur"]
        );
    }

    #[test]
    fn test_other_fields_are_duplicated_per_row() {
        let expanded = expand_rows(
            ticket_table(Cell::Text("A\nB".into()), Cell::Text("Luc Luc".into())),
            &ColumnNames::default(),
        )
        .unwrap();

        let id_idx = expanded.column_index("ID").unwrap();
        let req_idx = expanded.column_index("Demandeur").unwrap();
        for row in &expanded.rows {
            assert_eq!(row[id_idx], Cell::Text("42".into()));
            assert_eq!(row[req_idx], Cell::Text("Luc".into()));
        }
    }
}
