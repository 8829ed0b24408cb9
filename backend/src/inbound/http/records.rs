//! Record HTTP handlers.
//!
//! ```text
//! POST   /records/bulk
//! GET    /records
//! GET    /records/paginated?page=0&size=100
//! PUT    /records/{id}
//! DELETE /records/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BulkIngestOutcome, Error, ErrorCode, InvalidRecord, Record, RecordDraft, RecordId,
    TRACE_ID_HEADER, VALIDATION_FAILED,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Page index used when the query omits `page`.
pub const DEFAULT_PAGE: i64 = 0;
/// Page size used when the query omits `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Response payload for bulk ingest and spreadsheet upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkIngestResponse {
    #[schema(example = "Bulk upload processed")]
    pub message: String,
    pub saved_count: usize,
    pub invalid_count: usize,
    pub saved_records: Vec<Record>,
    pub invalid_records: Vec<InvalidRecord>,
}

impl BulkIngestResponse {
    pub(crate) fn from_outcome(message: &str, outcome: BulkIngestOutcome) -> Self {
        let saved_count = outcome.saved_count();
        let invalid_count = outcome.invalid_count();
        Self {
            message: message.to_owned(),
            saved_count,
            invalid_count,
            saved_records: outcome.saved,
            invalid_records: outcome.invalid,
        }
    }
}

/// Response payload for paginated listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordsPageResponse {
    pub records: Vec<Record>,
    pub total_pages: u64,
    pub total_records: u64,
}

impl From<Page<Record>> for RecordsPageResponse {
    fn from(page: Page<Record>) -> Self {
        let total_pages = page.total_pages();
        let total_records = page.total_items();
        Self {
            records: page.into_items(),
            total_pages,
            total_records,
        }
    }
}

/// Response payload for updates.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordResponse {
    #[schema(example = "Record updated successfully")]
    pub message: String,
    pub updated_record: Record,
}

/// One field rejected by update validation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectedField {
    #[schema(example = "email")]
    pub field: String,
    #[schema(value_type = Object)]
    pub rejected_value: Value,
    #[schema(example = "email must be a valid address")]
    pub error: String,
}

/// Response payload for updates rejected by validation.
///
/// Lists every broken rule rather than only the first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValidationResponse {
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// First broken rule, in field order.
    #[schema(example = "name is required")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub invalid_records: Vec<RejectedField>,
    pub invalid_count: usize,
}

impl UpdateValidationResponse {
    /// Extract the validation report carried by `error`, if any.
    fn from_error(error: &Error) -> Option<Self> {
        let details = error.details()?;
        if details.get("code").and_then(Value::as_str) != Some(VALIDATION_FAILED) {
            return None;
        }
        let invalid_records: Vec<RejectedField> =
            serde_json::from_value(details.get("invalidRecords")?.clone()).ok()?;
        Some(Self {
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: error.trace_id().map(str::to_owned),
            invalid_count: invalid_records.len(),
            invalid_records,
        })
    }

    fn into_response(self) -> HttpResponse {
        let mut builder = HttpResponse::BadRequest();
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(self)
    }
}

/// Plain acknowledgement payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Record with id 1 deleted successfully")]
    pub message: String,
}

/// Query parameters for paginated listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index.
    #[param(example = 0)]
    pub page: Option<i64>,
    /// Records per page.
    #[param(example = 100)]
    pub size: Option<i64>,
}

fn map_page_request_error(err: &PageRequestError) -> Error {
    let field = match err {
        PageRequestError::NegativeIndex { .. } => "page",
        PageRequestError::SizeTooSmall { .. } | PageRequestError::SizeTooLarge { .. } => "size",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_page_request",
    }))
}

fn page_request(query: &PageQuery, max_page_size: u32) -> Result<PageRequest, Error> {
    let size = query
        .size
        .unwrap_or_else(|| DEFAULT_PAGE_SIZE.min(i64::from(max_page_size)));
    PageRequest::try_new(query.page.unwrap_or(DEFAULT_PAGE), size, max_page_size)
        .map_err(|err| map_page_request_error(&err))
}

/// Validate, deduplicate and persist a batch of records.
#[utoipa::path(
    post,
    path = "/records/bulk",
    request_body = Vec<RecordDraft>,
    responses(
        (status = 200, description = "Batch processed", body = BulkIngestResponse),
        (status = 400, description = "Batch rejected", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "bulkIngestRecords"
)]
#[post("/records/bulk")]
pub async fn bulk_ingest(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<RecordDraft>>,
) -> ApiResult<web::Json<BulkIngestResponse>> {
    let outcome = state.records.ingest(payload.into_inner()).await?;
    Ok(web::Json(BulkIngestResponse::from_outcome(
        "Bulk upload processed",
        outcome,
    )))
}

/// List every stored record.
#[utoipa::path(
    get,
    path = "/records",
    responses(
        (status = 200, description = "All records ordered by id", body = Vec<Record>),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "listRecords"
)]
#[get("/records")]
pub async fn list_records(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Record>>> {
    Ok(web::Json(state.records_query.list_all().await?))
}

/// List one page of records.
#[utoipa::path(
    get,
    path = "/records/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of records", body = RecordsPageResponse),
        (status = 400, description = "Invalid page request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "listRecordsPaginated"
)]
#[get("/records/paginated")]
pub async fn list_records_paginated(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<RecordsPageResponse>> {
    let request = page_request(&query, state.max_page_size)?;
    let page = state.records_query.list_page(request).await?;
    Ok(web::Json(RecordsPageResponse::from(page)))
}

/// Replace name, email and age of a record.
#[utoipa::path(
    put,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Record identifier")),
    request_body = RecordDraft,
    responses(
        (status = 200, description = "Record updated", body = UpdateRecordResponse),
        (status = 400, description = "Invalid replacement or conflict; validation failures use the UpdateValidationResponse schema", body = Error),
        (status = 404, description = "Record not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "updateRecord"
)]
#[put("/records/{id}")]
pub async fn update_record(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<RecordDraft>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    match state.records.update(id, payload.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(UpdateRecordResponse {
            message: "Record updated successfully".to_owned(),
            updated_record: updated,
        })),
        Err(error) => match UpdateValidationResponse::from_error(&error) {
            Some(report) => Ok(report.into_response()),
            None => Err(error),
        },
    }
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 404, description = "Record not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "deleteRecord"
)]
#[delete("/records/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = RecordId::new(path.into_inner());
    state.records.delete(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Record with id {id} deleted successfully"),
    }))
}
