//! Code block processors.
//!
//! Processors are registered with the renderer and checked in order when a
//! code block is encountered. The first processor returning
//! [`ProcessResult::Inline`] wins; if none does, the block is rendered as
//! highlighted source.

use std::fmt::Write;

use crate::state::escape_html;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with this HTML.
    Inline(String),
    /// Render as a regular code block.
    PassThrough,
}

/// Handles code blocks of particular languages.
pub trait CodeBlockProcessor {
    /// Process a code block.
    ///
    /// `language` is the fence language, or the renderer's default language
    /// when the block has none.
    fn process(&mut self, language: &str, source: &str) -> ProcessResult;
}

/// Renders `example` blocks as live HTML followed by their source.
///
/// ````markdown
/// ```example
/// <button class="button">Save</button>
/// ```
/// ````
#[derive(Debug, Default)]
pub struct ExampleProcessor;

impl ExampleProcessor {
    /// Language handled by this processor.
    pub const LANGUAGE: &'static str = "example";
}

impl CodeBlockProcessor for ExampleProcessor {
    fn process(&mut self, language: &str, source: &str) -> ProcessResult {
        if language != Self::LANGUAGE {
            return ProcessResult::PassThrough;
        }

        let mut html = String::with_capacity(source.len() * 2 + 128);
        html.push_str("<div class=\"livingstyleguide--example\">\n");
        html.push_str(source);
        if !source.ends_with('\n') {
            html.push('\n');
        }
        html.push_str("</div>\n");
        write_source_block(Some("html"), source, &mut html);
        ProcessResult::Inline(html)
    }
}

/// Write escaped source as a style guide code block.
pub(crate) fn write_source_block(language: Option<&str>, source: &str, out: &mut String) {
    out.push_str("<pre class=\"livingstyleguide--code-block\"><code class=\"livingstyleguide--code");
    if let Some(language) = language {
        let _ = write!(out, " language-{}", escape_html(language));
    }
    let _ = writeln!(out, "\">{}</code></pre>", escape_html(source));
}

/// First word of a fence info string.
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_example_renders_live_html_and_source() {
        let mut processor = ExampleProcessor;
        let result = processor.process("example", "<b class=\"x\">Hi</b>\n");

        assert_eq!(
            result,
            ProcessResult::Inline(
                "<div class=\"livingstyleguide--example\">\n<b class=\"x\">Hi</b>\n</div>\n\
                 <pre class=\"livingstyleguide--code-block\"><code class=\"livingstyleguide--code language-html\">\
                 &lt;b class=&quot;x&quot;&gt;Hi&lt;/b&gt;\n</code></pre>\n"
                    .to_owned()
            )
        );
    }

    #[test]
    fn test_example_ignores_other_languages() {
        let mut processor = ExampleProcessor;
        assert_eq!(processor.process("scss", ".a {}"), ProcessResult::PassThrough);
    }

    #[test]
    fn test_source_block_without_language() {
        let mut out = String::new();
        write_source_block(None, "a < b", &mut out);
        assert_eq!(
            out,
            "<pre class=\"livingstyleguide--code-block\"><code class=\"livingstyleguide--code\">a &lt; b</code></pre>\n"
        );
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("scss linenos"), Some("scss"));
        assert_eq!(fence_language("   "), None);
    }
}
