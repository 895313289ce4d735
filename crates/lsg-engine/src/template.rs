//! Page template.
//!
//! The final document is produced by a minijinja template receiving six
//! values: `title`, `css`, `html`, `head`, `header` and `footer`. Values are
//! inserted unescaped, and referencing any other name is an error.

use std::path::{Path, PathBuf};

use lsg_config::Options;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

/// Built-in page layout.
const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.html");

/// Error returned when the page template cannot be loaded or rendered.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        /// Template path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Template failed to parse or render.
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Values bound into the page template.
#[derive(Clone, Copy, Debug)]
pub struct PageBindings<'a> {
    pub title: &'a str,
    pub css: &'a str,
    pub html: &'a str,
    pub head: &'a str,
    pub header: &'a str,
    pub footer: &'a str,
}

/// Page layout source.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    /// The built-in layout.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_source("default.html", DEFAULT_TEMPLATE)
    }

    /// A layout from a string.
    #[must_use]
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Read a layout from a file.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_source(path.display().to_string(), source))
    }

    /// Template name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the page.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] on syntax errors or references to
    /// unbound names.
    pub fn render(&self, bindings: &PageBindings<'_>) -> Result<String, TemplateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(&self.name, &self.source)?;

        let template = env.get_template(&self.name)?;
        let document = template.render(context! {
            title => bindings.title,
            css => bindings.css,
            html => bindings.html,
            head => bindings.head,
            header => bindings.header,
            footer => bindings.footer,
        })?;
        Ok(document)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Script tag for a `javascript_before`/`javascript_after` entry.
///
/// Entries ending in `.js` are referenced by `src`; anything else is inline
/// code.
pub fn javascript_tag(entry: &str) -> String {
    if entry.ends_with(".js") {
        format!(r#"<script src="{entry}"></script>"#)
    } else {
        format!("<script>{entry}</script>")
    }
}

fn javascript_tags(entries: Option<&[String]>) -> impl Iterator<Item = String> + '_ {
    entries
        .into_iter()
        .flatten()
        .map(String::as_str)
        .map(javascript_tag)
}

/// Page head content: `javascript_before` tags, one per line.
pub fn head(options: &Options) -> String {
    javascript_tags(options.javascript_before.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Page header content.
pub fn header(options: &Options) -> String {
    options.header.clone()
}

/// Page footer content: the footer snippet, then `javascript_after` tags,
/// one per line.
pub fn footer(options: &Options) -> String {
    std::iter::once(options.footer.clone())
        .chain(javascript_tags(options.javascript_after.as_deref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bindings() -> PageBindings<'static> {
        PageBindings {
            title: "Guide",
            css: ".a{color:red}",
            html: "<p>Hi & bye</p>",
            head: "<script src=\"a.js\"></script>",
            header: "<h1>Guide</h1>",
            footer: "<footer></footer>",
        }
    }

    #[test]
    fn test_javascript_tag() {
        assert_eq!(
            javascript_tag("app.js"),
            r#"<script src="app.js"></script>"#
        );
        assert_eq!(
            javascript_tag("console.log(1)"),
            "<script>console.log(1)</script>"
        );
        assert_eq!(
            javascript_tag("app.json"),
            "<script>app.json</script>"
        );
    }

    #[test]
    fn test_head_and_footer() {
        let options = Options {
            javascript_before: Some(vec!["vendor.js".to_owned(), "init()".to_owned()]),
            javascript_after: Some(vec!["app.js".to_owned(), "console.log(1)".to_owned()]),
            footer: "<p>Footer</p>".to_owned(),
            ..Options::default()
        };

        assert_eq!(
            head(&options),
            "<script src=\"vendor.js\"></script>\n<script>init()</script>"
        );
        assert_eq!(
            footer(&options),
            "<p>Footer</p>\n<script src=\"app.js\"></script>\n<script>console.log(1)</script>"
        );
    }

    #[test]
    fn test_without_scripts() {
        let options = Options::default();
        assert_eq!(head(&options), "");
        assert_eq!(footer(&options), options.footer);
        assert_eq!(header(&options), options.header);
    }

    #[test]
    fn test_builtin_binds_everything_unescaped() {
        let document = Template::builtin().render(&bindings()).unwrap();
        assert!(document.contains("<title>Guide</title>"));
        assert!(document.contains(".a{color:red}"));
        assert!(document.contains("<p>Hi & bye</p>"));
        assert!(document.contains("<script src=\"a.js\"></script>"));
        assert!(document.contains("<h1>Guide</h1>"));
        assert!(document.contains("<footer></footer>"));
    }

    #[test]
    fn test_custom_template() {
        let template = Template::from_source("custom", "{{ title }}|{{ html }}");
        assert_eq!(template.render(&bindings()).unwrap(), "Guide|<p>Hi & bye</p>");
    }

    #[test]
    fn test_unknown_binding_is_error() {
        let template = Template::from_source("custom", "{{ sidebar }}");
        let err = template.render(&bindings()).unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }

    #[test]
    fn test_syntax_error() {
        let template = Template::from_source("broken", "{% if %}");
        assert!(template.render(&bindings()).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.html");
        std::fs::write(&path, "<main>{{ html }}</main>").unwrap();

        let template = Template::from_file(&path).unwrap();
        assert_eq!(template.render(&bindings()).unwrap(), "<main><p>Hi & bye</p></main>");

        let err = Template::from_file(&dir.path().join("missing.html")).unwrap_err();
        assert!(matches!(err, TemplateError::Read { .. }));
    }
}
