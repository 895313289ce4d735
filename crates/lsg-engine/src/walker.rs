//! Import tree flattening.

use std::path::{Path, PathBuf};

use lsg_sass::ImportNode;

/// Flatten an import tree into the stylesheet files it uses.
///
/// Files appear in pre-order: a node's own file first, then the trees of its
/// import children from left to right. Only import children are followed,
/// so files imported from inside rule blocks are not listed. A file imported
/// twice is listed twice.
pub fn flatten(root: &ImportNode) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(filename) = node.filename()
            && is_stylesheet(filename)
        {
            files.push(filename.to_path_buf());
        }
        stack.extend(
            node.children
                .iter()
                .rev()
                .filter_map(ImportNode::imported_tree),
        );
    }

    files
}

/// Whether `path` has a `.scss` or `.sass` extension.
pub fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "scss" || ext == "sass")
}
