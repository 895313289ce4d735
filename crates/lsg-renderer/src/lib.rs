//! Markdown to living style guide HTML.
//!
//! [`MarkdownRenderer`] walks `pulldown-cmark` events and emits HTML whose
//! elements carry `livingstyleguide--*` classes, so a style guide page can be
//! themed without touching the rendered documentation.
//!
//! Code blocks labelled `example` (the default for unlabelled blocks) are
//! rendered twice: once as live HTML, once as escaped source.
//!
//! # Example
//!
//! ```
//! use lsg_renderer::MarkdownRenderer;
//!
//! let markdown = "# Buttons\n\n```\n<button class=\"btn\">Save</button>\n```";
//! let result = MarkdownRenderer::living_style_guide("example").render_markdown(markdown);
//! assert!(result.html.contains("livingstyleguide--example"));
//! ```

mod code_block;
mod renderer;
mod state;

pub use code_block::{CodeBlockProcessor, ExampleProcessor, ProcessResult};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
