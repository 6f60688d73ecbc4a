use std::fs;
use std::path::{Component, Path, PathBuf};

/// Largest markdown file accepted for upload.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parent directory access is not allowed: {0}")]
    ParentTraversal(PathBuf),
    #[error("Path is outside the workspace root: {0}")]
    OutsideRoot(PathBuf),
    #[error("File exceeds {limit} bytes: {path}")]
    TooLarge { path: PathBuf, limit: u64 },
}

/// Joins relative paths onto `root`; absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Checks that `path` may be read as upload input.
///
/// Rejects `..` components, absolute paths outside `root` and files larger
/// than [`MAX_FILE_SIZE`]. A missing file passes; reading reports it.
pub fn validate_path(path: &Path, root: &Path) -> Result<(), IoError> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(IoError::ParentTraversal(path.to_path_buf()));
    }

    if path.is_absolute() {
        let root = fs::canonicalize(root)?;
        let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !resolved.starts_with(&root) {
            return Err(IoError::OutsideRoot(path.to_path_buf()));
        }
    }

    let absolute_path = resolve_path(path, root);
    if let Ok(meta) = fs::metadata(&absolute_path)
        && meta.len() > MAX_FILE_SIZE
    {
        return Err(IoError::TooLarge {
            path: absolute_path,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(())
}

/// Validates and reads a markdown file.
pub fn read_markdown(path: &Path, root: &Path) -> Result<String, IoError> {
    validate_path(path, root)?;
    let absolute_path = resolve_path(path, root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_markdown(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_markdown_success() {
        let root = create_test_dir();
        create_test_file(&root, "test.md", "# Test Content\n\nParagraph");

        let content = read_markdown(Path::new("test.md"), root.path()).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_markdown_not_found() {
        let root = create_test_dir();
        let result = read_markdown(Path::new("nonexistent.md"), root.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let root = create_test_dir();
        let result = read_markdown(Path::new("../secret.md"), root.path());
        assert!(matches!(result, Err(IoError::ParentTraversal(_))));

        let result = validate_path(Path::new("notes/../../x.md"), root.path());
        assert!(matches!(result, Err(IoError::ParentTraversal(_))));
    }

    #[test]
    fn test_absolute_path_inside_root_allowed() {
        let root = create_test_dir();
        let file = create_test_file(&root, "inside.md", "body");

        let content = read_markdown(&file, root.path()).unwrap();
        assert_eq!(content, "body");
    }

    #[test]
    fn test_absolute_path_outside_root_rejected() {
        // Given two unrelated directories
        let root = create_test_dir();
        let other = create_test_dir();
        let file = create_test_file(&other, "outside.md", "body");

        // When reading a file from the other one
        let result = read_markdown(&file, root.path());

        // Then the path is refused
        assert!(matches!(result, Err(IoError::OutsideRoot(_))));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let root = create_test_dir();
        let file = create_test_file(&root, "big.md", "");
        let handle = fs::OpenOptions::new().write(true).open(&file).unwrap();
        handle.set_len(MAX_FILE_SIZE + 1).unwrap();

        let result = validate_path(Path::new("big.md"), root.path());
        assert!(matches!(result, Err(IoError::TooLarge { .. })));
    }

    #[test]
    fn test_write_markdown_creates_parent_directories() {
        let root = create_test_dir();
        let path = root.path().join("folder").join("subfolder").join("new_file.md");
        let content = "# New File in Nested Folder\n";

        // Write the file - this should create the parent directories
        write_markdown(&path, content).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        assert!(root.path().join("folder").join("subfolder").is_dir());
    }

    #[test]
    fn test_write_markdown_overwrites_existing() {
        let root = create_test_dir();
        let path = create_test_file(&root, "existing.md", "# Original Content");

        write_markdown(&path, "# Updated Content\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# Updated Content\n");
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/work");
        assert_eq!(resolve_path(Path::new("a.md"), root), PathBuf::from("/work/a.md"));
        assert_eq!(resolve_path(Path::new("/abs/a.md"), root), PathBuf::from("/abs/a.md"));
    }
}
