//! Session persistence port, validation, and the session service.

pub mod service;
pub mod store;
pub mod validation;
