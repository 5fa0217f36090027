//! Shared domain types for mediachat.
//!
//! Sessions, messages, identities, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
