//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`RecordsCommand`], [`RecordsQuery`]) are what inbound
//! adapters call. Driven ports ([`RecordRepository`], [`SpreadsheetDecoder`])
//! are what the domain calls; each exposes a typed error so adapters map their
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod record_repository;
mod records_command;
mod records_query;
mod spreadsheet_decoder;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{RecordRepository, RecordRepositoryError};
#[cfg(test)]
pub use records_command::MockRecordsCommand;
pub use records_command::RecordsCommand;
#[cfg(test)]
pub use records_query::MockRecordsQuery;
pub use records_query::RecordsQuery;
#[cfg(test)]
pub use spreadsheet_decoder::MockSpreadsheetDecoder;
pub use spreadsheet_decoder::{SpreadsheetDecodeError, SpreadsheetDecoder};
