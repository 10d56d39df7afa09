//! Workbook loading as plain string grids.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::Result;

/// A worksheet as a dense row-major grid of strings. Unwritten cells are
/// empty strings.
pub type Grid = Vec<Vec<String>>;

/// Every worksheet of a manifest workbook, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// (sheet name, cell grid) pairs.
    pub sheets: Vec<(String, Grid)>,
}

impl Workbook {
    /// Load every sheet of the workbook at `path`.
    ///
    /// Cells are rendered textually: numbers keep their literal form
    /// (integers without a trailing `.0`), dates become ISO strings, and
    /// empty cells become empty strings. No header row is assumed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = open_workbook_auto(path)?;
        let mut sheets = Vec::new();
        for (name, range) in reader.worksheets() {
            sheets.push((name, grid_from_range(&range)));
        }
        Ok(Self { sheets })
    }

    /// Borrow the grid of the sheet named `name`, if present.
    pub fn sheet(&self, name: &str) -> Option<&Grid> {
        self.sheets
            .iter()
            .find(|(sheet_name, _)| sheet_name == name)
            .map(|(_, grid)| grid)
    }
}

/// Materialize a calamine range into an absolute-coordinate grid.
///
/// Calamine ranges are windows onto the used region of a sheet; the grid is
/// padded back out so that cell (0,0) of the grid is cell A1 of the sheet.
fn grid_from_range(range: &calamine::Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::new();
    };
    let rows = start_row as usize + range.height();
    let cols = start_col as usize + range.width();

    let mut grid = vec![vec![String::new(); cols]; rows];
    for (r, c, cell) in range.used_cells() {
        grid[start_row as usize + r][start_col as usize + c] = render_cell(cell);
    }
    grid
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Spreadsheets store integers as floats; keep them literal.
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

/// True when every cell of the row is empty.
pub(crate) fn row_is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
