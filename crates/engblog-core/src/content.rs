//! Content items.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// Template formats recognised as content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// Markdown (`.md`).
    Md,
    /// Nunjucks (`.njk`).
    Njk,
    /// Plain HTML (`.html`).
    Html,
}

impl TemplateFormat {
    /// Determine the template format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Md),
            "njk" => Some(Self::Njk),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Md => "md",
            Self::Njk => "njk",
            Self::Html => "html",
        }
    }
}

/// A single unit of publishable content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Source file path.
    pub input_path: PathBuf,

    /// Output URL, e.g. `/posts/hello/`.
    pub url: String,

    /// Template format of the source.
    pub format: TemplateFormat,

    /// Front matter merged with directory data.
    pub data: Frontmatter,
}

impl ContentItem {
    /// Create an item for a file below `input_dir`.
    ///
    /// `src/posts/hello.md` maps to `/posts/hello/` and `src/index.njk` to `/`.
    pub fn new(input_dir: &Path, input_path: &Path, data: Frontmatter) -> Option<Self> {
        let format = TemplateFormat::from_extension(input_path.extension()?.to_str()?)?;
        Some(Self {
            url: url_for(input_dir, input_path),
            input_path: input_path.to_path_buf(),
            format,
            data,
        })
    }

    /// Directory of this item relative to the input directory, e.g. `posts`.
    pub fn section(&self) -> &str {
        self.url
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default()
    }

    /// Merge directory-level tags ahead of the item's own tags, without duplicates.
    pub fn merge_tags(&mut self, directory_tags: &[String]) {
        let mut merged: Vec<String> = Vec::with_capacity(directory_tags.len() + self.data.tags.len());
        for tag in directory_tags.iter().chain(self.data.tags.iter()) {
            if !merged.contains(tag) {
                merged.push(tag.clone());
            }
        }
        self.data.tags = merged;
    }
}

fn url_for(input_dir: &Path, input_path: &Path) -> String {
    let relative = input_path.strip_prefix(input_dir).unwrap_or(input_path);
    let parent = relative
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut segments: Vec<&str> = parent.split('/').filter(|s| !s.is_empty()).collect();
    if stem != "index" {
        segments.push(&stem);
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}
