//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod records;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod upload;

pub use error::ApiResult;
