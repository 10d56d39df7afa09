//! ExcelInvoice manifest parsing.
//!
//! The registration manifest ("ExcelInvoice") is a workbook with one main
//! sheet whose A1 cell holds the literal sentinel `invoiceList_format_id`,
//! plus optional `generalTerm` / `specificTerm` lookup sheets. The main
//! sheet carries two header rows (joined with `/` into dot/slash-qualified
//! column names such as `basic/dataName`) and data rows from the fifth row
//! down.
//!
//! Parsing is split into three layers so the table logic never touches the
//! spreadsheet library:
//!
//! - [`sheet`]: loads every worksheet as a plain grid of strings, with no
//!   implicit type coercion (dates and numbers stay textual).
//! - [`table`]: a minimal ordered named-column table.
//! - [`reader`]: sentinel discovery, header construction, blank-row
//!   detection, and the term lookup sheets.

pub mod reader;
pub mod sheet;
pub mod table;

pub use reader::{ExcelInvoice, COLUMN_DATA_FILE_NAME, COLUMN_DATA_FOLDER, INVOICE_LIST_SENTINEL};
pub use sheet::{Grid, Workbook};
pub use table::{GeneralTermRow, InvoiceTable, SpecificTermRow};
