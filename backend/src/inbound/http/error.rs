//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers turn
//! domain failures into consistent JSON envelopes and status codes. Extractor
//! failures (malformed JSON, query strings or path segments) are routed
//! through the same envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Default cap on JSON request bodies.
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if !matches!(self.code(), ErrorCode::InternalError) {
            return builder.json(self);
        }

        error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
        // Unexpected failures also expose the message under `error`.
        match serde_json::to_value(self) {
            Ok(Value::Object(mut body)) => {
                body.insert("error".to_owned(), Value::String(self.message().to_owned()));
                builder.json(body)
            }
            _ => builder.json(self),
        }
    }
}

fn extractor_error(kind: &'static str, detail: String) -> actix_web::Error {
    debug!(kind, %detail, "request extraction failed");
    Error::invalid_request(detail)
        .with_details(serde_json::json!({ "code": kind }))
        .into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("invalid_json", err.to_string())
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("invalid_query", err.to_string())
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("invalid_path", err.to_string())
}

/// JSON extractor configuration accepting bodies up to `limit_bytes` and
/// reporting failures as domain errors.
pub fn json_config(limit_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit_bytes)
        .error_handler(json_error_handler)
}

/// Query extractor configuration reporting failures as domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path extractor configuration reporting failures as domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

#[cfg(test)]
mod tests;
