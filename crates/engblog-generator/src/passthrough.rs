//! Passthrough copies.
//!
//! Copies registered files verbatim into the output directory, with the input
//! directory prefix stripped (`src/favicon.ico` lands at `dist/favicon.ico`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Passthrough errors.
#[derive(Debug, Error)]
pub enum PassthroughError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path escapes the project root.
    #[error("invalid passthrough path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for passthrough operations.
pub type Result<T> = std::result::Result<T, PassthroughError>;

/// Copies passthrough files for one project.
#[derive(Debug, Clone)]
pub struct Passthrough {
    root: PathBuf,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Passthrough {
    /// `input_dir` is relative to `root`; `output_dir` is used as given.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Destination for a registered path.
    pub fn destination(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(PassthroughError::InvalidPath(path.to_path_buf()));
        }
        let relative = path.strip_prefix(&self.input_dir).unwrap_or(path);
        Ok(self.output_dir.join(relative))
    }

    /// Copy every path, returning how many files were copied.
    ///
    /// Missing sources are skipped.
    pub fn copy_all(&self, paths: &[PathBuf]) -> Result<usize> {
        let mut count = 0;
        for path in paths {
            let source = self.root.join(path);
            if !source.is_file() {
                warn!(path = %source.display(), "passthrough source missing, skipping");
                continue;
            }

            let dest = self.destination(path)?;
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &dest)?;
            debug!(src = %source.display(), dest = %dest.display(), "copied passthrough file");
            count += 1;
        }

        info!(count, "passthrough copies complete");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_destination_strips_input_dir() {
        let passthrough = Passthrough::new("/site", "src", "/site/dist");
        assert_eq!(
            passthrough.destination(Path::new("src/favicon.ico")).unwrap(),
            PathBuf::from("/site/dist/favicon.ico")
        );
        assert_eq!(
            passthrough.destination(Path::new("robots.txt")).unwrap(),
            PathBuf::from("/site/dist/robots.txt")
        );
    }

    #[test]
    fn test_destination_rejects_escaping_paths() {
        let passthrough = Passthrough::new("/site", "src", "/site/dist");
        assert!(passthrough.destination(Path::new("../secret")).is_err());
        assert!(passthrough.destination(Path::new("/etc/passwd")).is_err());
    }

    #[test]
    fn test_copy_all() {
        let root = TempDir::new().unwrap();
        let out = root.path().join("dist");
        fs::create_dir_all(root.path().join("src/img")).unwrap();
        fs::write(root.path().join("src/favicon.ico"), b"\x00\x00\x01\x00").unwrap();
        fs::write(root.path().join("src/img/logo.svg"), "<svg/>").unwrap();

        let passthrough = Passthrough::new(root.path(), "src", &out);
        let count = passthrough
            .copy_all(&[
                PathBuf::from("src/favicon.ico"),
                PathBuf::from("src/img/logo.svg"),
            ])
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(out.join("favicon.ico")).unwrap(), b"\x00\x00\x01\x00");
        assert!(out.join("img/logo.svg").exists());
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let root = TempDir::new().unwrap();
        let passthrough = Passthrough::new(root.path(), "src", root.path().join("dist"));
        let count = passthrough
            .copy_all(&[PathBuf::from("src/favicon.ico")])
            .unwrap();
        assert_eq!(count, 0);
    }
}
