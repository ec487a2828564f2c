//! File discovery for schema sources and templates.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A file found under a scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as reached from the scan root.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,
}

/// Recursive scanner matching a single file extension.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    extension: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to scan {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },
}

impl Scanner {
    /// `extension` is given without the leading dot.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every matching file under the root, sorted by path.
    ///
    /// A missing root is not an error; it yields no files and a warning.
    pub fn scan(&self) -> Result<Vec<DiscoveredFile>, ScanError> {
        if !self.root.exists() {
            tracing::warn!("Scan root {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: self.root.clone(),
                source: e,
            })?;

            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            let path = entry.into_path();
            let relative_path = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();
            files.push(DiscoveredFile {
                path,
                relative_path,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        if files.is_empty() {
            tracing::warn!(
                "No .{} files found under {}",
                self.extension,
                self.root.display()
            );
        }

        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;

    #[test]
    fn Scanner___scan___finds_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/inner")).unwrap();
        fs::write(dir.path().join("z.proto"), "").unwrap();
        fs::write(dir.path().join("b/inner/a.proto"), "").unwrap();
        fs::write(dir.path().join("a.proto"), "").unwrap();

        let files = Scanner::new(dir.path(), "proto").scan().unwrap();

        let relative: Vec<PathBuf> = files.into_iter().map(|f| f.relative_path).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.proto"),
                PathBuf::from("b/inner/a.proto"),
                PathBuf::from("z.proto"),
            ]
        );
    }

    #[test]
    fn Scanner___scan___ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("user.proto"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::write(dir.path().join("user.proto.bak"), "").unwrap();

        let files = Scanner::new(dir.path(), "proto").scan().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("user.proto"));
    }

    #[test]
    fn Scanner___missing_root___yields_empty() {
        let dir = tempfile::tempdir().unwrap();

        let files = Scanner::new(dir.path().join("nope"), "tpl").scan().unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn Scanner___directory_with_matching_name___is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("odd.tpl")).unwrap();
        fs::write(dir.path().join("odd.tpl/real.tpl"), "").unwrap();

        let files = Scanner::new(dir.path(), "tpl").scan().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, PathBuf::from("odd.tpl/real.tpl"));
    }
}
