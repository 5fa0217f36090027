//! Generator trait definition.
//!
//! The abstraction every media backend implements. Uses RPITIT like the
//! store traits; the orchestrator is generic over it.

use std::sync::Arc;

use mediachat_types::error::GeneratorError;
use mediachat_types::session::{GeneratedArtifact, MediaKind};

/// Turns a prompt and a media kind into generated content.
///
/// Implementations may call out to a model service; latency bounds are
/// applied by the caller.
pub trait Generator: Send + Sync {
    /// Human-readable backend name (e.g., "template").
    fn name(&self) -> &str;

    /// Produce an artifact for `prompt`.
    fn generate(
        &self,
        prompt: &str,
        media_kind: MediaKind,
    ) -> impl std::future::Future<Output = Result<GeneratedArtifact, GeneratorError>> + Send;
}

impl<G: Generator> Generator for Arc<G> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    async fn generate(
        &self,
        prompt: &str,
        media_kind: MediaKind,
    ) -> Result<GeneratedArtifact, GeneratorError> {
        self.as_ref().generate(prompt, media_kind).await
    }
}
