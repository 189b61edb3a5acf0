//! Observability module - request ids and access logging.

mod access_log;

pub use access_log::{AccessLog, REQUEST_ID_HEADER};
