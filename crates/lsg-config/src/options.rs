//! Render options and their defaults.

use serde::Deserialize;

/// Default page title.
pub const DEFAULT_TITLE: &str = "Living Style Guide";

/// Default page header snippet.
pub const DEFAULT_HEADER: &str =
    r#"<h1 class="livingstyleguide--page-title">Living Style Guide</h1>"#;

/// Default page footer snippet.
pub const DEFAULT_FOOTER: &str = r#"<div class="livingstyleguide--footer"><a class="livingstyleguide--logo" href="http://livingstyleguide.org">Made with the LivingStyleGuide gem.</a></div>"#;

/// Options controlling a single style guide render.
///
/// Built by overlaying [`OptionOverrides`] onto [`Options::default`].
/// Immutable once handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Language assumed for fenced code blocks without an info string.
    pub default_language: String,
    /// Page title.
    pub title: String,
    /// HTML snippet placed in the page header.
    pub header: String,
    /// HTML snippet placed in the page footer.
    pub footer: String,
    /// Base path for generated links.
    pub root: String,
    /// Scripts emitted in the page head.
    pub javascript_before: Option<Vec<String>>,
    /// Scripts emitted after the footer content.
    pub javascript_after: Option<Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_language: "example".to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            header: DEFAULT_HEADER.to_owned(),
            footer: DEFAULT_FOOTER.to_owned(),
            root: "/".to_owned(),
            javascript_before: None,
            javascript_after: None,
        }
    }
}

/// Caller-supplied option values.
///
/// Only `Some` fields replace the value they overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptionOverrides {
    pub default_language: Option<String>,
    pub title: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub root: Option<String>,
    pub javascript_before: Option<Vec<String>>,
    pub javascript_after: Option<Vec<String>>,
}

impl OptionOverrides {
    /// Overlay `other` on top of `self`, `other` winning field by field.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            default_language: other.default_language.or(self.default_language),
            title: other.title.or(self.title),
            header: other.header.or(self.header),
            footer: other.footer.or(self.footer),
            root: other.root.or(self.root),
            javascript_before: other.javascript_before.or(self.javascript_before),
            javascript_after: other.javascript_after.or(self.javascript_after),
        }
    }
}

impl Options {
    /// Overlay caller-supplied values onto the defaults.
    #[must_use]
    pub fn merged(overrides: OptionOverrides) -> Self {
        let defaults = Self::default();
        Self {
            default_language: overrides
                .default_language
                .unwrap_or(defaults.default_language),
            title: overrides.title.unwrap_or(defaults.title),
            header: overrides.header.unwrap_or(defaults.header),
            footer: overrides.footer.unwrap_or(defaults.footer),
            root: overrides.root.unwrap_or(defaults.root),
            javascript_before: overrides.javascript_before.or(defaults.javascript_before),
            javascript_after: overrides.javascript_after.or(defaults.javascript_after),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.default_language, "example");
        assert_eq!(options.title, "Living Style Guide");
        assert_eq!(options.root, "/");
        assert!(options.header.contains("livingstyleguide--page-title"));
        assert!(options.footer.contains("Made with the LivingStyleGuide gem."));
        assert!(options.javascript_before.is_none());
        assert!(options.javascript_after.is_none());
    }

    #[test]
    fn test_merged_without_overrides_is_default() {
        assert_eq!(Options::merged(OptionOverrides::default()), Options::default());
    }

    #[test]
    fn test_merged_replaces_only_given_fields() {
        let options = Options::merged(OptionOverrides {
            title: Some("Acme UI".to_owned()),
            javascript_after: Some(vec!["app.js".to_owned()]),
            ..Default::default()
        });

        assert_eq!(options.title, "Acme UI");
        assert_eq!(options.javascript_after, Some(vec!["app.js".to_owned()]));
        assert_eq!(options.header, DEFAULT_HEADER);
        assert_eq!(options.default_language, "example");
    }

    #[test]
    fn test_overrides_or_prefers_other() {
        let file = OptionOverrides {
            title: Some("From file".to_owned()),
            root: Some("/guide/".to_owned()),
            ..Default::default()
        };
        let cli = OptionOverrides {
            title: Some("From CLI".to_owned()),
            ..Default::default()
        };

        let combined = file.or(cli);
        assert_eq!(combined.title.as_deref(), Some("From CLI"));
        assert_eq!(combined.root.as_deref(), Some("/guide/"));
    }

    #[test]
    fn test_deserialize_partial_options() {
        let toml = r#"
title = "Components"
javascript_before = ["vendor/jquery.js", "window.ready = true"]
"#;
        let overrides: OptionOverrides = toml::from_str(toml).unwrap();
        assert_eq!(overrides.title.as_deref(), Some("Components"));
        assert_eq!(
            overrides.javascript_before,
            Some(vec![
                "vendor/jquery.js".to_owned(),
                "window.ready = true".to_owned()
            ])
        );
        assert!(overrides.footer.is_none());
    }
}
