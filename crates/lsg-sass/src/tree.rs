//! Import tree model.
//!
//! An [`ImportNode`] tree mirrors how a compiled stylesheet pulled in its
//! files: the root node is the stylesheet itself, `@import` rules become
//! [`NodeKind::Import`] children carrying the tree of the imported file, and
//! everything else (rule blocks, plain CSS imports) is another node kind.

use std::path::{Path, PathBuf};

/// Kind of a node in the import tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a parsed stylesheet (the compiled source or an imported file).
    Root,
    /// `@import` of another stylesheet.
    Import {
        /// Import target as written in the source (e.g. `"base/buttons"`).
        target: String,
        /// Tree of the imported file.
        imported_tree: Box<ImportNode>,
    },
    /// A rule block. Imports nested inside it are its children.
    Rule,
    /// Plain CSS `@import` passed through to the output unchanged.
    CssImport {
        /// The import argument as written.
        url: String,
    },
}

/// A node in a compiled stylesheet's dependency tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportNode {
    /// Physical file backing this node, if any.
    pub filename: Option<PathBuf>,
    /// What the node represents.
    pub kind: NodeKind,
    /// Child nodes in declaration order.
    pub children: Vec<ImportNode>,
}

impl ImportNode {
    /// Create a root node.
    #[must_use]
    pub fn root(filename: Option<PathBuf>, children: Vec<ImportNode>) -> Self {
        Self {
            filename,
            kind: NodeKind::Root,
            children,
        }
    }

    /// Create an import node pointing at the tree of the imported file.
    #[must_use]
    pub fn import(target: impl Into<String>, imported_tree: ImportNode) -> Self {
        Self {
            filename: None,
            kind: NodeKind::Import {
                target: target.into(),
                imported_tree: Box::new(imported_tree),
            },
            children: Vec::new(),
        }
    }

    /// Create a rule node.
    #[must_use]
    pub fn rule(children: Vec<ImportNode>) -> Self {
        Self {
            filename: None,
            kind: NodeKind::Rule,
            children,
        }
    }

    /// Create a plain CSS import node.
    #[must_use]
    pub fn css_import(url: impl Into<String>) -> Self {
        Self {
            filename: None,
            kind: NodeKind::CssImport { url: url.into() },
            children: Vec::new(),
        }
    }

    /// Tree of the imported file, for import nodes.
    pub fn imported_tree(&self) -> Option<&ImportNode> {
        match &self.kind {
            NodeKind::Import { imported_tree, .. } => Some(imported_tree),
            _ => None,
        }
    }

    /// Whether this node is an `@import` of another stylesheet.
    pub fn is_import(&self) -> bool {
        matches!(self.kind, NodeKind::Import { .. })
    }

    /// Physical file backing this node, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_exposes_tree() {
        let leaf = ImportNode::root(Some(PathBuf::from("a/_b.scss")), vec![]);
        let node = ImportNode::import("b", leaf.clone());

        assert!(node.is_import());
        assert_eq!(node.imported_tree(), Some(&leaf));
        assert!(node.filename().is_none());
    }

    #[test]
    fn test_other_kinds_have_no_tree() {
        assert!(ImportNode::rule(vec![]).imported_tree().is_none());
        assert!(!ImportNode::css_import("url(x.css)").is_import());
        assert!(!ImportNode::root(None, vec![]).is_import());
    }
}
