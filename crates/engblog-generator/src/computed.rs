//! Computed fields for content items.
//!
//! Posts get their author id replaced with the author record and a reading
//! time derived from the source file. Values are computed on first request
//! and cached per item.

use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

use engblog_core::{Author, Authors, ContentItem, CoreError, Result};
use regex::Regex;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::debug;

/// Typical reading speed in words per minute.
pub const WORDS_PER_MINUTE: usize = 250;

/// Derived presentation fields of a content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedData {
    /// Resolved author, absent when the id matches no record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Arc<Author>>,

    /// Reading time in whole minutes, when the item computes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<usize>,
}

/// Data applied to every item under a content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryData {
    /// Directory name relative to the input directory.
    pub dir: String,

    /// Tags merged into each item's own tags.
    pub tags: Vec<String>,

    /// Whether items compute a reading time.
    pub reading_time: bool,
}

impl DirectoryData {
    /// Directory data for blog posts.
    pub fn posts() -> Self {
        Self {
            dir: "posts".to_string(),
            tags: vec!["posts".to_string()],
            reading_time: true,
        }
    }

    /// Whether an item lives under this directory.
    pub fn applies_to(&self, item: &ContentItem) -> bool {
        item.section() == self.dir
    }
}

/// A content item with lazily computed fields.
#[derive(Debug)]
pub struct ComputedItem {
    pub item: ContentItem,
    reading_time: bool,
    computed: OnceCell<ComputedData>,
}

impl ComputedItem {
    /// Wrap an item. `reading_time` enables the reading-time field.
    pub fn new(item: ContentItem, reading_time: bool) -> Self {
        Self {
            item,
            reading_time,
            computed: OnceCell::new(),
        }
    }

    /// Computed data, if it has been resolved.
    pub fn computed(&self) -> Option<&ComputedData> {
        self.computed.get()
    }
}

/// Count word-like tokens (`[\w']+`).
pub fn count_words(text: &str) -> usize {
    word_pattern().find_iter(text).count()
}

/// Minutes needed to read `words` words, rounded up.
pub fn minutes_for(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

fn word_pattern() -> &'static Regex {
    static PATTERN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[A-Za-z0-9_']+").expect("word pattern is valid"));
    &PATTERN
}

/// Computes derived fields from the shared site data.
#[derive(Debug, Clone)]
pub struct ComputedFields<'a> {
    authors: &'a Authors,
}

impl<'a> ComputedFields<'a> {
    #[must_use]
    pub fn new(authors: &'a Authors) -> Self {
        Self { authors }
    }

    /// Resolve an author id. An unknown or missing id resolves to `None`.
    pub fn author(&self, id: Option<&str>) -> Option<Arc<Author>> {
        let id = id?;
        let author = self.authors.get(id).cloned();
        if author.is_none() {
            debug!(id, "author id did not resolve");
        }
        author
    }

    /// Reading time of a source file in minutes.
    pub async fn reading_time(&self, path: &Path) -> Result<usize> {
        let content = tokio::fs::read_to_string(path).await?;
        let words = count_words(&content);
        debug!(path = %path.display(), words, "counted words");
        Ok(minutes_for(words))
    }

    /// Computed data for an item, computing it on first use.
    pub async fn resolve<'i>(&self, item: &'i ComputedItem) -> Result<&'i ComputedData> {
        item.computed
            .get_or_try_init(|| async {
                let reading_time = if item.reading_time {
                    Some(self.reading_time(&item.item.input_path).await?)
                } else {
                    None
                };
                Ok::<_, CoreError>(ComputedData {
                    author: self.author(item.item.data.author.as_deref()),
                    reading_time,
                })
            })
            .await
    }
}
