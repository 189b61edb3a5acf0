//! # Blog Shared
//!
//! Wire types shared between the server and its clients: auth payloads and
//! the JSON envelopes every endpoint answers with.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
