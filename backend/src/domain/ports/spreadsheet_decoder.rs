//! Port for turning uploaded spreadsheets into candidate records.

use crate::domain::RecordDraft;

use super::define_port_error;

define_port_error! {
    /// Errors raised while decoding a spreadsheet.
    pub enum SpreadsheetDecodeError {
        /// The bytes could not be opened as a workbook.
        Workbook { message } =>
            "failed to read spreadsheet: {message}",
        /// The workbook holds no worksheet.
        MissingWorksheet =>
            "failed to read spreadsheet: workbook has no worksheet",
        /// A cell holds a value of the wrong kind.
        InvalidCell { cell, message } =>
            "failed to read spreadsheet: cell {cell}: {message}",
    }
}

/// Decoder for spreadsheet uploads.
///
/// Reads the first worksheet, skips its header row and maps columns
/// name, email and age onto [`RecordDraft`] fields. Decoders never validate.
#[cfg_attr(test, mockall::automock)]
pub trait SpreadsheetDecoder: Send + Sync {
    /// Decode `bytes` into candidates in row order.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordDraft>, SpreadsheetDecodeError>;
}
