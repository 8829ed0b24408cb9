//! Builder for the HTTP state backing the record endpoints.

use std::sync::Arc;

use backend::domain::{RecordService, StandardRecordValidator};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryRecordRepository;
use backend::outbound::persistence::DieselRecordRepository;
use backend::outbound::spreadsheet::CalamineSpreadsheetDecoder;
use tracing::warn;

use super::ServerConfig;

/// Build handler state, storing records in PostgreSQL when a pool is
/// configured and in memory otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let validator = Arc::new(StandardRecordValidator);
    let decoder = Arc::new(CalamineSpreadsheetDecoder::new());

    let state = match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(RecordService::new(
                Arc::new(DieselRecordRepository::new(pool.clone())),
                validator,
                decoder,
            ));
            HttpState::new(service.clone(), service)
        }
        None => {
            warn!("no database configured; records are kept in memory");
            let service = Arc::new(RecordService::new(
                Arc::new(InMemoryRecordRepository::new()),
                validator,
                decoder,
            ));
            HttpState::new(service.clone(), service)
        }
    };

    state.with_max_page_size(config.max_page_size)
}
