//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together with
//! the payload and error schemas they reference. The document is served by
//! Swagger UI in debug builds and printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, FieldViolation, InvalidRecord, Record, RecordDraft, RecordField};
use crate::inbound::http::records::{
    BulkIngestResponse, MessageResponse, RecordsPageResponse, RejectedField, UpdateRecordResponse,
    UpdateValidationResponse,
};
use crate::inbound::http::upload::{UploadErrorResponse, UploadFormSchema};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Records backend API",
        description = "Bulk ingest, spreadsheet upload and maintenance of person records.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::records::bulk_ingest,
        crate::inbound::http::records::list_records,
        crate::inbound::http::records::list_records_paginated,
        crate::inbound::http::records::update_record,
        crate::inbound::http::records::delete_record,
        crate::inbound::http::upload::upload_records,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Record,
        RecordDraft,
        InvalidRecord,
        BulkIngestResponse,
        RecordsPageResponse,
        UpdateRecordResponse,
        UpdateValidationResponse,
        RejectedField,
        MessageResponse,
        UploadFormSchema,
        UploadErrorResponse,
        FieldViolation,
        RecordField,
        Error,
        ErrorCode
    )),
    tags(
        (name = "records", description = "Record ingest and maintenance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
