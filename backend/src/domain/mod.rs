//! Domain primitives, ports and services.
//!
//! Purpose: define the record model, the validation engine and the pipelines
//! that ingest, update and delete records. Nothing here knows about HTTP,
//! Diesel or spreadsheets; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - RecordDraft / NewRecord / Record / RecordId: the record model.
//! - RecordValidator / StandardRecordValidator: the validation engine.
//! - RecordService: implementation of the driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod bulk_ingest;
pub mod error;
pub mod ports;
mod record;
mod record_service;
mod trace_id;
mod validation;

pub use self::bulk_ingest::{
    BulkIngestOutcome, DUPLICATE_IN_REQUEST, EXISTS_IN_DATABASE, InvalidRecord, request_emails,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::record::{NewRecord, Record, RecordDraft, RecordId};
pub use self::record_service::{RecordService, VALIDATION_FAILED};
pub use self::trace_id::TraceId;
pub use self::validation::{
    FieldViolation, RecordField, RecordValidator, StandardRecordValidator, Violations,
};
