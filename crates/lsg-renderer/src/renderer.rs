//! Markdown renderer producing living style guide HTML.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::code_block::{
    CodeBlockProcessor, ExampleProcessor, ProcessResult, fence_language, write_source_block,
};
use crate::state::{CodeBlockState, HeadingState, TableState, TocEntry, escape_html};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn class(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Unordered => "unordered",
        }
    }
}

/// Renders markdown into HTML annotated with `livingstyleguide--*` classes.
///
/// Fenced code blocks without a language, and indented code blocks, take the
/// configured default language. Registered [`CodeBlockProcessor`]s see every
/// code block first.
pub struct MarkdownRenderer {
    output: String,
    list_stack: Vec<ListKind>,
    code: CodeBlockState,
    table: TableState,
    heading: HeadingState,
    /// Image being rendered: (src, title, alt text).
    image: Option<(String, String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    default_language: String,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with no processors and `example` as default language.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            list_stack: Vec::new(),
            code: CodeBlockState::default(),
            table: TableState::default(),
            heading: HeadingState::default(),
            image: None,
            processors: Vec::new(),
            default_language: ExampleProcessor::LANGUAGE.to_owned(),
            gfm: true,
        }
    }

    /// Create the standard style guide renderer.
    ///
    /// Uses `default_language` for unlabelled code blocks and renders
    /// `example` blocks as live HTML.
    #[must_use]
    pub fn living_style_guide(default_language: impl Into<String>) -> Self {
        Self::new()
            .with_default_language(default_language)
            .with_processor(ExampleProcessor)
    }

    /// Set the language assumed for code blocks without one.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Add a code block processor.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Enable or disable tables, strikethrough and task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options for the current configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Render markdown text.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render markdown events.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: self.heading.take_toc(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.push_inline("<br>\n"),
            Event::Rule => self.output.push_str("<hr class=\"livingstyleguide--separator\">\n"),
            Event::TaskListMarker(checked) => self.push_inline(if checked {
                r#"<input type="checkbox" checked disabled> "#
            } else {
                r#"<input type="checkbox" disabled> "#
            }),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    /// Push inline content to the heading buffer or the output.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p class=\"livingstyleguide--paragraph\">"),
            Tag::Heading { level, .. } => self.heading.start(heading_level_to_num(level)),
            Tag::BlockQuote(_) => self.output.push_str("<blockquote class=\"livingstyleguide--quote\">\n"),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info).map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(info);
            }
            Tag::List(start) => {
                let kind = if start.is_some() {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                self.list_stack.push(kind);
                let tag = if kind == ListKind::Ordered { "ol" } else { "ul" };
                let _ = write!(self.output, "<{tag} class=\"livingstyleguide--{}-list\"", kind.class());
                match start {
                    Some(n) if n != 1 => {
                        let _ = writeln!(self.output, " start=\"{n}\">");
                    }
                    _ => self.output.push_str(">\n"),
                }
            }
            Tag::Item => {
                let kind = self.list_stack.last().copied().unwrap_or(ListKind::Unordered);
                let _ = write!(
                    self.output,
                    "<li class=\"livingstyleguide--{}-list-item\">",
                    kind.class()
                );
            }
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table class=\"livingstyleguide--table\">\n");
            }
            Tag::TableHead => {
                self.table.set_head(true);
                self.output.push_str("<thead>\n<tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let _ = write!(
                    self.output,
                    "<{}{}>",
                    self.table.cell_tag(),
                    self.table.alignment_style()
                );
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { dest_url, title, .. } => {
                let mut link = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link, r#" title="{}""#, escape_html(&title));
                }
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some((dest_url.to_string(), title.to_string(), String::new()));
            }
            Tag::DefinitionList => self.output.push_str("<dl>\n"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete() {
                    let class = if level == 1 {
                        "headline"
                    } else {
                        "sub-headline"
                    };
                    let _ = writeln!(
                        self.output,
                        r#"<h{level} class="livingstyleguide--{class}" id="{id}">{}</h{level}>"#,
                        html.trim()
                    );
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => self.code_block(),
            TagEnd::List(ordered) => {
                self.list_stack.pop();
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::Table => self.output.push_str("</tbody>\n</table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr>\n</thead>\n<tbody>\n");
                self.table.set_head(false);
            }
            TagEnd::TableRow => self.output.push_str("</tr>\n"),
            TagEnd::TableCell => {
                let _ = write!(self.output, "</{}>", self.table.cell_tag());
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.take() {
                    let mut img = format!(
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&src),
                        escape_html(&alt)
                    );
                    if !title.is_empty() {
                        let _ = write!(img, r#" title="{}""#, escape_html(&title));
                    }
                    img.push('>');
                    self.push_inline(&img);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>\n"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>\n"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn code_block(&mut self) {
        let (info, source) = self.code.end();
        let language = info.unwrap_or_else(|| self.default_language.clone());

        for processor in &mut self.processors {
            if let ProcessResult::Inline(html) = processor.process(&language, &source) {
                self.output.push_str(&html);
                return;
            }
        }

        write_source_block(Some(&language), &source, &mut self.output);
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if let Some((_, _, alt)) = self.image.as_mut() {
            alt.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let span = format!(
            r#"<code class="livingstyleguide--code-span livingstyleguide--code">{}</code>"#,
            escape_html(code)
        );
        self.push_inline(&span);
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
