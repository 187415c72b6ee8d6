//! Cell coercion
//!
//! Turns loosely typed cells into the column types of the works table.
//! Text and dates are lenient (anything unusable becomes null); numbers are
//! strict, since a measurement that is not a number is a data error.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::error::{ImportError, Result};
use crate::source::CellValue;

/// Text formats tried in order for date cells stored as text
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Largest serial day number a spreadsheet can hold (9999-12-31)
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

/// Render a number the way a person typed it: `1` rather than `1.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Optional text; blank cells become `None`
pub fn text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        CellValue::Number(n) => Some(format_number(*n)),
        CellValue::Bool(b) => Some(b.to_string()),
        CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
    }
}

/// Optional number; blank cells become `None`, anything non-numeric is an error
///
/// Text is accepted when it parses as a finite number, with either `.` or a
/// single `,` as the decimal separator.
pub fn number(column: &str, cell: &CellValue) -> Result<Option<f64>> {
    let invalid = |value: String| ImportError::Coercion {
        column: column.to_string(),
        value,
    };

    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Number(n) if n.is_finite() => Ok(Some(*n)),
        CellValue::Number(n) => Err(invalid(n.to_string())),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_decimal(trimmed).ok_or_else(|| invalid(trimmed.to_string())).map(Some)
        }
        CellValue::Bool(b) => Err(invalid(b.to_string())),
        CellValue::Date(d) => Err(invalid(d.to_string())),
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let normalized = if !s.contains('.') && s.matches(',').count() == 1 {
        s.replace(',', ".")
    } else {
        s.to_string()
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient date: anything that cannot be read as a date becomes `None`
pub fn date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Number(serial) => date_from_serial(*serial),
        CellValue::Text(s) => parse_date_text(s.trim()),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// Convert a spreadsheet serial day number (1900 date system) to a date
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL_DAY {
        return None;
    }

    // Day zero is 1899-12-30 once the phantom 1900-02-29 is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
