//! HTTP request handlers for the REST API.

pub mod generate;
pub mod session;
