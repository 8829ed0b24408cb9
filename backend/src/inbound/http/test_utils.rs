//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::{RecordService, StandardRecordValidator};
use crate::inbound::http::error::{DEFAULT_JSON_LIMIT_BYTES, json_config, path_config, query_config};
use crate::inbound::http::records::{
    bulk_ingest, delete_record, list_records, list_records_paginated, update_record,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::upload::{multipart_config, upload_records, DEFAULT_UPLOAD_LIMIT_BYTES};
use crate::outbound::memory::InMemoryRecordRepository;
use crate::outbound::spreadsheet::CalamineSpreadsheetDecoder;

/// Build handler state over an empty in-memory store.
pub fn in_memory_state() -> HttpState {
    let service = Arc::new(RecordService::new(
        Arc::new(InMemoryRecordRepository::new()),
        Arc::new(StandardRecordValidator),
        Arc::new(CalamineSpreadsheetDecoder::new()),
    ));
    HttpState::new(service.clone(), service)
}

/// Application exposing every record endpoint with production extractor
/// configuration.
pub fn records_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config(DEFAULT_JSON_LIMIT_BYTES))
        .app_data(query_config())
        .app_data(path_config())
        .app_data(multipart_config(DEFAULT_UPLOAD_LIMIT_BYTES))
        .service(bulk_ingest)
        .service(list_records_paginated)
        .service(list_records)
        .service(update_record)
        .service(delete_record)
        .service(upload_records)
}
