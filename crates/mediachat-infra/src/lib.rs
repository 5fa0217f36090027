//! Infrastructure layer for mediachat.
//!
//! Contains the SQLite implementation of the `SessionStore` trait defined in
//! `mediachat-core`, the identity/API key store behind the HTTP auth gate, and
//! config/data directory resolution.

pub mod config;
pub mod sqlite;
