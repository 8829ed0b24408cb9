//! Calamine-backed spreadsheet decoder.
//!
//! Reads Office Open XML workbooks held in memory. The first worksheet's first
//! used row is a header and is skipped. Columns A, B and C of every following
//! row map to name, email and age. Rows with all three cells empty are
//! skipped; nothing is validated here.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::domain::RecordDraft;
use crate::domain::ports::{SpreadsheetDecodeError, SpreadsheetDecoder};

const NAME_COLUMN: u32 = 0;
const EMAIL_COLUMN: u32 = 1;
const AGE_COLUMN: u32 = 2;

/// Decoder for `.xlsx` uploads.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineSpreadsheetDecoder;

impl CalamineSpreadsheetDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }
}

/// Spreadsheet-style reference such as `C7` for zero-based coordinates.
fn cell_ref(row: u32, column: u32) -> String {
    let letter = char::from_u32(u32::from(b'A') + column).unwrap_or('?');
    format!("{letter}{}", row + 1)
}

fn text_cell(
    range: &Range<Data>,
    row: u32,
    column: u32,
) -> Result<Option<String>, SpreadsheetDecodeError> {
    match range.get_value((row, column)) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(text)) => Ok(Some(text.trim().to_owned())),
        Some(other) => Err(SpreadsheetDecodeError::invalid_cell(
            cell_ref(row, column),
            format!("expected text, found {other:?}"),
        )),
    }
}

fn whole_number(value: f64, cell: impl FnOnce() -> String) -> Result<i32, SpreadsheetDecodeError> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX)
    {
        return Err(SpreadsheetDecodeError::invalid_cell(
            cell(),
            format!("number {value} is out of range"),
        ));
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is truncated and range-checked against i32 above"
    )]
    Ok(truncated as i32)
}

fn age_cell(range: &Range<Data>, row: u32) -> Result<Option<i32>, SpreadsheetDecodeError> {
    let cell = || cell_ref(row, AGE_COLUMN);
    match range.get_value((row, AGE_COLUMN)) {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Int(value)) => i32::try_from(*value).map(Some).map_err(|_| {
            SpreadsheetDecodeError::invalid_cell(cell(), format!("number {value} is out of range"))
        }),
        Some(Data::Float(value)) => whole_number(*value, cell).map(Some),
        Some(Data::DateTime(value)) => whole_number(value.as_f64(), cell).map(Some),
        Some(other) => Err(SpreadsheetDecodeError::invalid_cell(
            cell(),
            format!("expected a number, found {other:?}"),
        )),
    }
}

fn decode_row(range: &Range<Data>, row: u32) -> Result<Option<RecordDraft>, SpreadsheetDecodeError> {
    let name = text_cell(range, row, NAME_COLUMN)?;
    let email = text_cell(range, row, EMAIL_COLUMN)?;
    let age = age_cell(range, row)?;

    if name.is_none() && email.is_none() && age.is_none() {
        return Ok(None);
    }
    Ok(Some(RecordDraft {
        id: None,
        name,
        email,
        age,
    }))
}

impl SpreadsheetDecoder for CalamineSpreadsheetDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<RecordDraft>, SpreadsheetDecodeError> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|err| SpreadsheetDecodeError::workbook(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(SpreadsheetDecodeError::missing_worksheet)?
            .map_err(|err| SpreadsheetDecodeError::workbook(err.to_string()))?;

        let (Some((header_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
            return Ok(Vec::new());
        };

        let mut drafts = Vec::new();
        for row in (header_row + 1)..=last_row {
            if let Some(draft) = decode_row(&range, row)? {
                drafts.push(draft);
            }
        }
        Ok(drafts)
    }
}
