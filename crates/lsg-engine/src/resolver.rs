//! Documentation fragment discovery.
//!
//! A stylesheet `a/buttons.scss` is documented by fragments found with the
//! pattern `a/buttons.md`. The stylesheet extension is replaced, nothing
//! else about the path changes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::walker::is_stylesheet;

/// Extension of documentation fragments.
pub const FRAGMENT_EXTENSION: &str = "md";

/// Finds the documentation fragments belonging to a stylesheet file.
pub trait FragmentResolver {
    /// Fragments documenting `stylesheet`, possibly none.
    fn resolve_fragments(&self, stylesheet: &Path) -> Vec<PathBuf>;
}

/// [`FragmentResolver`] expanding the fragment pattern against the filesystem.
///
/// The pattern is the stylesheet path itself with its extension swapped, so
/// glob metacharacters in a stylesheet name can match several fragments.
/// Matches are returned in lexicographic order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobFragmentResolver;

impl FragmentResolver for GlobFragmentResolver {
    fn resolve_fragments(&self, stylesheet: &Path) -> Vec<PathBuf> {
        let candidate = fragment_path(stylesheet);
        let pattern = candidate.to_string_lossy();

        let mut matches: Vec<PathBuf> = match glob::glob(&pattern) {
            Ok(paths) => paths
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping unreadable fragment candidate");
                        None
                    }
                })
                .collect(),
            // Not a valid pattern: only the literal path can match.
            Err(_) => {
                if candidate.is_file() {
                    vec![candidate.clone()]
                } else {
                    Vec::new()
                }
            }
        };
        matches.sort();
        matches
    }
}

/// Path of the fragment documenting `stylesheet`, before pattern expansion.
pub fn fragment_path(stylesheet: &Path) -> PathBuf {
    if is_stylesheet(stylesheet) {
        stylesheet.with_extension(FRAGMENT_EXTENSION)
    } else {
        let mut path = OsString::from(stylesheet.as_os_str());
        path.push(".");
        path.push(FRAGMENT_EXTENSION);
        PathBuf::from(path)
    }
}

/// Stylesheet files of a render followed by their documentation fragments.
///
/// Fragments are resolved in one pass over the stylesheet files: fragments
/// of the first stylesheet come first, and fragments are never themselves
/// resolved again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
    stylesheet_count: usize,
}

impl FileList {
    /// Build the list from flattened stylesheet files.
    pub fn resolve(stylesheets: Vec<PathBuf>, resolver: &dyn FragmentResolver) -> Self {
        let stylesheet_count = stylesheets.len();
        let fragments: Vec<PathBuf> = stylesheets
            .iter()
            .flat_map(|stylesheet| resolver.resolve_fragments(stylesheet))
            .collect();

        let mut paths = stylesheets;
        paths.extend(fragments);

        tracing::debug!(
            file_count = stylesheet_count,
            fragment_count = paths.len() - stylesheet_count,
            "Resolved documentation fragments"
        );

        Self {
            paths,
            stylesheet_count,
        }
    }

    /// Every file: stylesheets first, then fragments.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Stylesheet files in import order.
    pub fn stylesheets(&self) -> &[PathBuf] {
        &self.paths[..self.stylesheet_count]
    }

    /// Fragment files in the order of their stylesheets.
    pub fn fragments(&self) -> &[PathBuf] {
        &self.paths[self.stylesheet_count..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::fs;

    struct MapResolver(HashMap<PathBuf, Vec<PathBuf>>);

    impl FragmentResolver for MapResolver {
        fn resolve_fragments(&self, stylesheet: &Path) -> Vec<PathBuf> {
            self.0.get(stylesheet).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn test_fragment_path() {
        assert_eq!(
            fragment_path(Path::new("a/_buttons.scss")),
            PathBuf::from("a/_buttons.md")
        );
        assert_eq!(
            fragment_path(Path::new("grid.sass")),
            PathBuf::from("grid.md")
        );
        assert_eq!(
            fragment_path(Path::new("theme.dark.scss")),
            PathBuf::from("theme.dark.md")
        );
        assert_eq!(fragment_path(Path::new("plain")), PathBuf::from("plain.md"));
    }

    #[test]
    fn test_glob_finds_sibling() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("buttons.md"), "# Buttons\n").unwrap();

        let found = GlobFragmentResolver.resolve_fragments(&dir.path().join("buttons.scss"));
        assert_eq!(found, vec![dir.path().join("buttons.md")]);
    }

    #[test]
    fn test_glob_without_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let found = GlobFragmentResolver.resolve_fragments(&dir.path().join("buttons.scss"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_glob_multiple_matches_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("icons-b.md"), "b").unwrap();
        fs::write(dir.path().join("icons-a.md"), "a").unwrap();
        fs::write(dir.path().join("icons-c.txt"), "c").unwrap();

        let found = GlobFragmentResolver.resolve_fragments(&dir.path().join("icons-?.scss"));
        assert_eq!(
            found,
            vec![dir.path().join("icons-a.md"), dir.path().join("icons-b.md")]
        );
    }

    #[test]
    fn test_file_list_orders_fragments_after_stylesheets() {
        let resolver = MapResolver(HashMap::from([
            (
                PathBuf::from("a.scss"),
                vec![PathBuf::from("a.md"), PathBuf::from("a2.md")],
            ),
            (PathBuf::from("c.scss"), vec![PathBuf::from("c.md")]),
        ]));
        let list = FileList::resolve(
            vec![
                PathBuf::from("a.scss"),
                PathBuf::from("b.scss"),
                PathBuf::from("c.scss"),
            ],
            &resolver,
        );

        assert_eq!(
            list.paths(),
            [
                PathBuf::from("a.scss"),
                PathBuf::from("b.scss"),
                PathBuf::from("c.scss"),
                PathBuf::from("a.md"),
                PathBuf::from("a2.md"),
                PathBuf::from("c.md"),
            ]
        );
        assert_eq!(list.stylesheets().len(), 3);
        assert_eq!(list.fragments().len(), 3);
    }

    #[test]
    fn test_fragments_are_not_resolved_again() {
        let resolver = MapResolver(HashMap::from([
            (PathBuf::from("a.scss"), vec![PathBuf::from("a.md")]),
            (PathBuf::from("a.md"), vec![PathBuf::from("a.md.md")]),
        ]));
        let list = FileList::resolve(vec![PathBuf::from("a.scss")], &resolver);
        assert_eq!(list.fragments(), [PathBuf::from("a.md")]);
    }

    #[test]
    fn test_empty_list() {
        let list = FileList::resolve(Vec::new(), &GlobFragmentResolver);
        assert!(list.paths().is_empty());
        assert!(list.fragments().is_empty());
    }
}
