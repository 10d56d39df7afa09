//! Manifest workbook interpretation.

use std::path::Path;

use log::debug;

use crate::error::{Result, StructuringError};
use crate::manifest::sheet::{row_is_blank, Grid, Workbook};
use crate::manifest::table::{GeneralTermRow, InvoiceTable, SpecificTermRow};

/// Sentinel value in cell A1 that marks the main registration sheet.
pub const INVOICE_LIST_SENTINEL: &str = "invoiceList_format_id";

/// Main-table column that selects flat-file sub-mode when present.
pub const COLUMN_DATA_FILE_NAME: &str = "data_file_names/name";

/// Main-table column naming each row's raw-data folder in folder sub-mode.
pub const COLUMN_DATA_FOLDER: &str = "data_folder";

/// Sheet holding the `term_id -> key_name` lookup.
const GENERAL_TERM_SHEET: &str = "generalTerm";

/// Sheet holding the `(sample_class_id, term_id) -> key_name` lookup.
const SPECIFIC_TERM_SHEET: &str = "specificTerm";

/// First data row of the main sheet (rows 0-3 are sentinel and headers).
const DATA_ROW_START: usize = 4;

/// Parsed ExcelInvoice manifest: the main registration table plus the two
/// term lookup tables.
#[derive(Debug, Clone, Default)]
pub struct ExcelInvoice {
    /// Main registration table, one row per tile, columns qualified as
    /// `header1/header2`.
    pub main: InvoiceTable,
    /// `generalTerm` rows, empty when the sheet is absent.
    pub general_terms: Vec<GeneralTermRow>,
    /// `specificTerm` rows, empty when the sheet is absent.
    pub specific_terms: Vec<SpecificTermRow>,
}

impl ExcelInvoice {
    /// Read and interpret the workbook at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        debug!("reading ExcelInvoice manifest {}", path.display());
        Self::from_workbook(&Workbook::load(path)?)
    }

    /// Interpret an already-loaded workbook.
    ///
    /// Exactly one sheet must carry the [`INVOICE_LIST_SENTINEL`] in its
    /// top-left cell; sheets other than that one and the term sheets are
    /// ignored.
    pub fn from_workbook(workbook: &Workbook) -> Result<Self> {
        let mut main_grids: Vec<&Grid> = workbook
            .sheets
            .iter()
            .filter(|(_, grid)| {
                grid.first()
                    .and_then(|row| row.first())
                    .is_some_and(|cell| cell == INVOICE_LIST_SENTINEL)
            })
            .map(|(_, grid)| grid)
            .collect();

        let main_grid = match main_grids.len() {
            0 => {
                return Err(StructuringError::invoice_format(
                    "no sheet in invoiceList files",
                ))
            }
            1 => main_grids.remove(0),
            _ => {
                return Err(StructuringError::invoice_format(
                    "multiple sheet in invoiceList files",
                ))
            }
        };

        check_interior_blank_rows(main_grid)?;
        let main = build_main_table(main_grid);

        let general_terms = workbook
            .sheet(GENERAL_TERM_SHEET)
            .map(|grid| general_terms_from_grid(grid))
            .unwrap_or_default();
        let specific_terms = workbook
            .sheet(SPECIFIC_TERM_SHEET)
            .map(|grid| specific_terms_from_grid(grid))
            .unwrap_or_default();

        Ok(Self {
            main,
            general_terms,
            specific_terms,
        })
    }
}

/// Reject data regions with blank rows in the middle.
///
/// A blank row followed (anywhere later) by a non-blank row means the
/// author left a gap inside the registration list; trailing blanks are
/// normal spreadsheet slack. Header rows are not scanned.
fn check_interior_blank_rows(grid: &Grid) -> Result<()> {
    let data_rows = grid.iter().skip(DATA_ROW_START);
    let last_filled = grid
        .iter()
        .enumerate()
        .skip(DATA_ROW_START)
        .filter(|(_, row)| !row_is_blank(row))
        .map(|(i, _)| i)
        .last();

    if let Some(last_filled) = last_filled {
        for (i, row) in data_rows.enumerate() {
            let index = i + DATA_ROW_START;
            if index < last_filled && row_is_blank(row) {
                return Err(StructuringError::invoice_format(
                    "blank lines exist between lines",
                ));
            }
        }
    }
    Ok(())
}

/// Build the main table: drop fully-empty columns, join the two header
/// rows with `/`, and take data rows from index 4 onward.
fn build_main_table(grid: &Grid) -> InvoiceTable {
    let width = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    let cell = |row: usize, col: usize| -> &str {
        grid.get(row)
            .and_then(|r| r.get(col))
            .map(|c| c.as_str())
            .unwrap_or("")
    };

    let kept_columns: Vec<usize> = (0..width)
        .filter(|&col| (0..grid.len()).any(|row| !cell(row, col).trim().is_empty()))
        .collect();

    let columns: Vec<String> = kept_columns
        .iter()
        .map(|&col| {
            let top = cell(1, col).trim();
            let bottom = cell(2, col).trim();
            if top.is_empty() {
                bottom.to_string()
            } else {
                format!("{top}/{bottom}")
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = grid
        .iter()
        .skip(DATA_ROW_START)
        .filter(|row| !row_is_blank(row))
        .map(|row| {
            kept_columns
                .iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    InvoiceTable::new(columns, rows)
}

fn general_terms_from_grid(grid: &Grid) -> Vec<GeneralTermRow> {
    grid.iter()
        .skip(1) // sub-header
        .filter(|row| !row_is_blank(row))
        .map(|row| GeneralTermRow {
            term_id: row.first().cloned().unwrap_or_default(),
            key_name: row.get(1).cloned().unwrap_or_default(),
        })
        .collect()
}

fn specific_terms_from_grid(grid: &Grid) -> Vec<SpecificTermRow> {
    grid.iter()
        .skip(1) // sub-header
        .filter(|row| !row_is_blank(row))
        .map(|row| SpecificTermRow {
            sample_class_id: row.first().cloned().unwrap_or_default(),
            term_id: row.get(1).cloned().unwrap_or_default(),
            key_name: row.get(2).cloned().unwrap_or_default(),
        })
        .collect()
}
