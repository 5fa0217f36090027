//! Generator port, the template Generator, and the generation orchestrator.

pub mod generator;
pub mod orchestrator;
pub mod template;
