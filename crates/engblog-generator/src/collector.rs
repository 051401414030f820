//! Content collection.
//!
//! Walks the input directory, parses front matter and applies directory data.

use std::path::{Path, PathBuf};

use engblog_core::{ContentItem, CoreError, TemplateFormat, frontmatter::parse_frontmatter};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::computed::{ComputedItem, DirectoryData};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Front matter error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collects content items below an input directory.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    input_dir: PathBuf,
    directory_data: Vec<DirectoryData>,
}

impl ContentCollector {
    /// Collector for `input_dir` with the posts directory data.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            directory_data: vec![DirectoryData::posts()],
        }
    }

    /// Replace the directory data.
    #[must_use]
    pub fn with_directory_data(mut self, data: Vec<DirectoryData>) -> Self {
        self.directory_data = data;
        self
    }

    /// Collect all items, sorted by input path.
    pub fn collect(&self) -> Result<Vec<ComputedItem>> {
        info!(dir = %self.input_dir.display(), "collecting content");

        if !self.input_dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let walker = WalkDir::new(&self.input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_template(entry.path()) {
                continue;
            }
            items.push(self.parse_file(entry.path())?);
        }

        info!(count = items.len(), "content collection complete");
        Ok(items)
    }

    fn parse_file(&self, path: &Path) -> Result<ComputedItem> {
        debug!(path = %path.display(), "parsing file");

        let content = std::fs::read_to_string(path)?;
        let (frontmatter, _body) = parse_frontmatter(&content, path)?;
        let mut item = ContentItem::new(&self.input_dir, path, frontmatter)
            .ok_or_else(|| CoreError::frontmatter(path, "not a template file"))?;

        let applicable: Vec<&DirectoryData> = self
            .directory_data
            .iter()
            .filter(|data| data.applies_to(&item))
            .collect();

        let mut reading_time = false;
        for data in applicable {
            item.merge_tags(&data.tags);
            reading_time |= data.reading_time;
        }

        Ok(ComputedItem::new(item, reading_time))
    }
}

/// Hidden entries and `_`-prefixed data/include directories.
fn is_skipped(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || name.starts_with('_'))
}

fn is_template(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(TemplateFormat::from_extension)
        .is_some()
}
