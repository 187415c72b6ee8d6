//! Error types for obras-import

use thiserror::Error;

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Import error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// Workbook could not be opened or parsed
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Requested sheet is not in the workbook
    #[error("Sheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    /// Required header missing from the sheet
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Cell value could not be converted to the column's type
    #[error("Invalid value for '{column}': {value:?}")]
    Coercion { column: String, value: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// obras-common error
    #[error(transparent)]
    Common(#[from] obras_common::Error),
}
