//! Business logic and port definitions for mediachat.
//!
//! This crate defines the traits the infrastructure layer implements
//! (`SessionStore`) and the capabilities it consumes (`Generator`), plus the
//! services built on them. It depends only on `mediachat-types` -- never on
//! `mediachat-infra` or any database/IO crate.

pub mod generation;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
