//! Spreadsheet upload handler.
//!
//! ```text
//! POST /records/upload   (multipart/form-data, field `file`)
//! ```
//!
//! Failures the client can fix (missing file, undecodable workbook, rejected
//! batch) are reported as `{"error": "<message>"}` with status 400. Storage
//! failures keep the standard error envelope.

use actix_multipart::MultipartError;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::BulkIngestResponse;
use crate::inbound::http::state::HttpState;

/// Default cap on uploaded spreadsheet size.
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Multipart body for spreadsheet uploads.
#[derive(MultipartForm)]
pub struct UploadForm {
    /// Workbook bytes.
    pub file: Option<Bytes>,
}

/// OpenAPI description of [`UploadForm`].
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct UploadFormSchema {
    /// `.xlsx` workbook; first sheet, header row, columns name, email, age.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Client-facing upload failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadErrorResponse {
    #[schema(example = "File is missing")]
    pub error: String,
}

fn upload_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(UploadErrorResponse {
        error: message.into(),
    })
}

fn multipart_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "multipart extraction failed");
    let response = upload_error(err.to_string());
    InternalError::from_response(err, response).into()
}

/// Multipart configuration bounding upload size and reporting extraction
/// failures in the upload error shape.
pub fn multipart_config(limit_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(limit_bytes)
        .memory_limit(limit_bytes)
        .error_handler(multipart_error_handler)
}

/// Ingest the rows of an uploaded spreadsheet.
#[utoipa::path(
    post,
    path = "/records/upload",
    request_body(content = UploadFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload processed", body = BulkIngestResponse),
        (status = 400, description = "Missing, unreadable or rejected upload", body = UploadErrorResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "uploadRecords"
)]
#[post("/records/upload")]
pub async fn upload_records(
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> ApiResult<HttpResponse> {
    let Some(file) = form.file.filter(|file| !file.data.is_empty()) else {
        return Ok(upload_error("File is missing"));
    };

    match state.records.ingest_spreadsheet(&file.data).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(BulkIngestResponse::from_outcome(
            "Upload processed successfully",
            outcome,
        ))),
        Err(err) if matches!(err.code(), ErrorCode::InternalError) => Err(err),
        Err(err) => Ok(upload_error(err.message())),
    }
}
