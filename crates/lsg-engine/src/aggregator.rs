//! Fragment concatenation.

use std::path::PathBuf;

use crate::EngineError;

/// Concatenate fragment contents in order.
///
/// Contents are joined as they are, with no separator.
///
/// # Errors
///
/// Returns [`EngineError::MissingFragment`] for the first fragment that
/// cannot be read.
pub fn aggregate(fragments: &[PathBuf]) -> Result<String, EngineError> {
    let mut markdown = String::new();
    for path in fragments {
        let content =
            std::fs::read_to_string(path).map_err(|source| EngineError::MissingFragment {
                path: path.clone(),
                source,
            })?;
        markdown.push_str(&content);
    }
    Ok(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_concatenates_raw() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "# A").unwrap();
        fs::write(&b, "# B\n").unwrap();

        assert_eq!(aggregate(&[a.clone(), b, a]).unwrap(), "# A# B\n# A");
    }

    #[test]
    fn test_empty() {
        assert_eq!(aggregate(&[]).unwrap(), "");
    }

    #[test]
    fn test_missing_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        fs::write(&a, "# A").unwrap();
        let gone = dir.path().join("gone.md");

        let err = aggregate(&[a, gone.clone()]).unwrap_err();
        match err {
            EngineError::MissingFragment { path, .. } => assert_eq!(path, gone),
            other => panic!("unexpected error: {other}"),
        }
    }
}
