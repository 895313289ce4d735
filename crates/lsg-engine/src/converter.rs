//! Markup to HTML conversion.

use lsg_config::Options;
use lsg_renderer::MarkdownRenderer;

/// Error returned when markup conversion fails.
#[derive(Debug, thiserror::Error)]
#[error("Markup conversion failed: {message}")]
pub struct ConversionError {
    /// Reason given by the converter.
    pub message: String,
}

impl ConversionError {
    /// Create a conversion error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converts aggregated markup into HTML.
pub trait MarkupConverter {
    /// Convert `markup` using the render options.
    fn convert(&self, markup: &str, options: &Options) -> Result<String, ConversionError>;
}

/// [`MarkupConverter`] producing `livingstyleguide--*` annotated HTML.
#[derive(Clone, Copy, Debug, Default)]
pub struct LivingStyleGuideConverter;

impl MarkupConverter for LivingStyleGuideConverter {
    fn convert(&self, markup: &str, options: &Options) -> Result<String, ConversionError> {
        let result = MarkdownRenderer::living_style_guide(options.default_language.as_str())
            .render_markdown(markup);
        tracing::debug!(
            html_len = result.html.len(),
            headings = result.toc.len(),
            "Converted markup"
        );
        Ok(result.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_from_options() {
        let markup = "```\n<button>OK</button>\n```";

        let html = LivingStyleGuideConverter
            .convert(markup, &Options::default())
            .unwrap();
        assert!(html.contains("<div class=\"livingstyleguide--example\">"));

        let options = Options {
            default_language: "scss".to_owned(),
            ..Options::default()
        };
        let html = LivingStyleGuideConverter.convert(markup, &options).unwrap();
        assert!(!html.contains("<div class=\"livingstyleguide--example\">"));
        assert!(html.contains("language-scss"));
    }

    #[test]
    fn test_empty_markup() {
        let html = LivingStyleGuideConverter
            .convert("", &Options::default())
            .unwrap();
        assert_eq!(html, "");
    }
}
