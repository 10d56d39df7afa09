//! Minimal named-column table used for the manifest's main sheet.
//!
//! Deliberately not a dataframe: the pipeline only ever needs column
//! membership checks, per-row lookups by column name, and whole-column
//! reads, so the representation is an ordered list of column names plus
//! row-major string data.

/// Row-oriented table with ordered, named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InvoiceTable {
    /// Build a table, padding short rows to the column count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, String::new());
            row.truncate(width);
        }
        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True when a column of that exact name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell at (`row`, column `name`), if both exist.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == name)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// All values of the named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let col = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[col].as_str()).collect())
    }

    /// Iterate data rows.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

/// One row of the `generalTerm` lookup sheet: `term_id -> key_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralTermRow {
    /// Opaque term identifier.
    pub term_id: String,
    /// Human-readable key path the term maps to.
    pub key_name: String,
}

/// One row of the `specificTerm` lookup sheet:
/// `(sample_class_id, term_id) -> key_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificTermRow {
    /// Sample class the term is scoped to.
    pub sample_class_id: String,
    /// Opaque term identifier.
    pub term_id: String,
    /// Human-readable key path the term maps to.
    pub key_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvoiceTable {
        InvoiceTable::new(
            vec!["basic/dataName".into(), "data_folder".into()],
            vec![
                vec!["run-1".into(), "data1".into()],
                vec!["run-2".into()], // short row, padded
            ],
        )
    }

    #[test]
    fn test_lookup_by_column_name() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("data_folder"));
        assert!(!table.has_column("data_file_names/name"));
        assert_eq!(table.get(0, "basic/dataName"), Some("run-1"));
        assert_eq!(table.get(1, "data_folder"), Some(""));
        assert_eq!(table.get(2, "data_folder"), None);
    }

    #[test]
    fn test_column_values_in_row_order() {
        let table = sample();
        assert_eq!(table.column("data_folder"), Some(vec!["data1", ""]));
        assert_eq!(table.column("missing"), None);
    }
}
