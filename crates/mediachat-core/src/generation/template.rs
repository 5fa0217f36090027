//! Deterministic stand-in Generator.

use mediachat_types::error::GeneratorError;
use mediachat_types::session::{GeneratedArtifact, MediaKind};

use super::generator::Generator;

/// Generator that describes what would have been produced, without any I/O.
///
/// Output: `Generated {kind} from: "{prompt}"`.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render the placeholder content for a prompt.
    pub fn render(prompt: &str, media_kind: MediaKind) -> String {
        format!("Generated {media_kind} from: \"{prompt}\"")
    }
}

impl Generator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(
        &self,
        prompt: &str,
        media_kind: MediaKind,
    ) -> Result<GeneratedArtifact, GeneratorError> {
        Ok(GeneratedArtifact {
            media_kind,
            content: Self::render(prompt, media_kind),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_output() {
        let generator = TemplateGenerator::new();
        let artifact = generator
            .generate("draw a cat", MediaKind::Graphics)
            .await
            .unwrap();
        assert_eq!(artifact.media_kind, MediaKind::Graphics);
        assert_eq!(artifact.content, "Generated graphics from: \"draw a cat\"");
    }

    #[test]
    fn test_render_uses_lowercase_kind() {
        assert_eq!(
            TemplateGenerator::render("rain", MediaKind::Audio),
            "Generated audio from: \"rain\""
        );
        assert_eq!(
            TemplateGenerator::render("a sunset", MediaKind::Video),
            "Generated video from: \"a sunset\""
        );
    }
}
