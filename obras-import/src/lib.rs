//! obras-import library - spreadsheet to database import
//!
//! Reads the works spreadsheet and loads it in two passes:
//! 1. Catalog pass: projects, crews and responsibles, committed on their own
//! 2. Fact pass: one work (plus its evidence) per row, each row isolated in
//!    its own savepoint so a bad row never spoils its neighbours

pub mod coerce;
pub mod columns;
pub mod error;
pub mod importer;
pub mod record;
pub mod source;
pub mod spreadsheet;

pub use error::{ImportError, Result};
pub use importer::{ImportReport, Importer};
pub use source::{CellValue, SourceRow, SourceTable};
