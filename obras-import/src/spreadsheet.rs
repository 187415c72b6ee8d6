//! Workbook reading via calamine
//!
//! The first row of the sheet is the header row; every following row is
//! data. Rows whose cells are all blank are dropped.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::coerce;
use crate::error::{ImportError, Result};
use crate::source::{CellValue, SourceTable};

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`) into a [`SourceTable`]
pub fn read_sheet(path: &Path, sheet: &str) -> Result<SourceTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == sheet) {
        return Err(ImportError::SheetNotFound {
            sheet: sheet.to_string(),
            available: sheet_names.join(", "),
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        info!("Sheet '{}' is empty", sheet);
        return Ok(SourceTable::default());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| coerce::text(&cell_value(cell)).unwrap_or_default())
        .collect();
    debug!("Sheet '{}' headers: {:?}", sheet, headers);

    let mut table = SourceTable::new(headers);
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    info!("Read {} data row(s) from sheet '{}' of {}", table.len(), sheet, path.display());
    Ok(table)
}

/// Convert a calamine cell to a [`CellValue`]
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => coerce::date_from_serial(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => coerce::date(&CellValue::text(s))
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty),
        Data::DurationIso(s) => CellValue::text(s),
        // #N/A, #DIV/0! and friends carry no data
        Data::Error(_) => CellValue::Empty,
    }
}
