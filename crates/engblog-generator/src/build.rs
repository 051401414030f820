//! Build orchestration.
//!
//! Composes the host, collects content, resolves computed fields item by item
//! and writes the site data export the renderer consumes.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use engblog_core::{Authors, Config, CoreError, Metadata};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collections::CollectionApi,
    collector::{CollectorError, ContentCollector},
    computed::{ComputedData, ComputedFields, ComputedItem},
    passthrough::{Passthrough, PassthroughError},
    plugins::{HostConfig, SiteSettings, compose},
};

/// File name of the site data export.
pub const SITE_DATA_FILE: &str = "site-data.json";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Computed field error for one item.
    #[error("failed to compute fields for {path}: {source}")]
    Computed {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    /// Passthrough error.
    #[error("passthrough error: {0}")]
    Passthrough(#[from] PassthroughError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of content items collected.
    pub items: usize,

    /// Number of items with a reading time.
    pub timed: usize,

    /// Number of items whose author id did not resolve.
    pub unresolved_authors: usize,

    /// Number of passthrough files copied.
    pub passthrough: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemExport<'a> {
    url: &'a str,
    input_path: &'a Path,
    data: &'a engblog_core::Frontmatter,
    #[serde(flatten)]
    computed: &'a ComputedData,
}

#[derive(Serialize)]
struct SiteExport<'a> {
    config: Value,
    settings: &'a SiteSettings,
    metadata: &'a Metadata,
    authors: Vec<&'a engblog_core::Author>,
    collections: BTreeMap<String, Value>,
    items: Vec<ItemExport<'a>>,
}

/// Site builder.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    authors: Authors,
    root: PathBuf,
    output_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a builder for a project root.
    #[must_use]
    pub fn new(config: Config, authors: Authors, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            authors,
            root: root.into(),
            output_dir: None,
        }
    }

    /// Write output somewhere other than the configured output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Execute the full build.
    pub async fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        let mut host = HostConfig::new();
        let settings = compose(&mut host);
        let input_dir = self.root.join(&settings.dir.input);
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| self.root.join(&settings.dir.output));

        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            plugins = ?host.plugins(),
            "starting build"
        );

        self.clean_output(&output_dir)?;

        let items = ContentCollector::new(&input_dir).collect()?;
        stats.items = items.len();

        let fields = ComputedFields::new(&self.authors);
        for item in &items {
            let computed = fields
                .resolve(item)
                .await
                .map_err(|source| BuildError::Computed {
                    path: item.item.input_path.clone(),
                    source,
                })?;
            if computed.reading_time.is_some() {
                stats.timed += 1;
            }
            if item.item.data.author.is_some() && computed.author.is_none() {
                stats.unresolved_authors += 1;
            }
        }

        let collections =
            host.build_collections(&CollectionApi::new(items.iter().map(|i| &i.item)));

        stats.passthrough = Passthrough::new(&self.root, &settings.dir.input, &output_dir)
            .copy_all(host.passthrough_copies())?;

        let metadata = Metadata::new(&self.config);
        self.write_site_data(&output_dir, &settings, &metadata, collections, &items)?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            items = stats.items,
            timed = stats.timed,
            unresolved_authors = stats.unresolved_authors,
            passthrough = stats.passthrough,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    fn clean_output(&self, output_dir: &Path) -> Result<()> {
        if output_dir.exists() {
            debug!(dir = %output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(output_dir)?;
        }
        fs::create_dir_all(output_dir)?;
        Ok(())
    }

    fn write_site_data(
        &self,
        output_dir: &Path,
        settings: &SiteSettings,
        metadata: &Metadata,
        collections: BTreeMap<String, Value>,
        items: &[ComputedItem],
    ) -> Result<()> {
        let default = ComputedData::default();
        let export = SiteExport {
            config: self.config.properties(),
            settings,
            metadata,
            authors: self.authors.list().iter().map(|author| &**author).collect(),
            collections,
            items: items
                .iter()
                .map(|item| ItemExport {
                    url: &item.item.url,
                    input_path: &item.item.input_path,
                    data: &item.item.data,
                    computed: item.computed().unwrap_or(&default),
                })
                .collect(),
        };

        let path = output_dir.join(SITE_DATA_FILE);
        fs::write(&path, serde_json::to_string_pretty(&export)?)?;
        info!(path = %path.display(), "wrote site data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_config() -> Config {
        Config {
            env: "test".to_string(),
            base_url: Some("https://example.com".to_string()),
        }
    }

    fn read_export(dir: &Path) -> Value {
        let raw = fs::read_to_string(dir.join("dist").join(SITE_DATA_FILE)).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_build_empty_site() {
        let root = TempDir::new().unwrap();
        let stats = Builder::new(test_config(), Authors::builtin(), root.path())
            .build()
            .await
            .unwrap();

        assert_eq!(stats.items, 0);
        assert_eq!(stats.passthrough, 0);

        let export = read_export(root.path());
        assert_eq!(export["metadata"]["url"], "https://example.com/");
        assert_eq!(export["collections"]["tagList"], serde_json::json!([]));
        assert_eq!(export["config"]["env"], "test");
    }

    #[tokio::test]
    async fn test_build_resolves_posts() {
        let root = TempDir::new().unwrap();
        let posts = root.path().join("src/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("hello.md"),
            "---\ntitle: Hello\nauthor: nathan\ntags: rust\n---\nHello world",
        )
        .unwrap();
        fs::write(root.path().join("src/about.md"), "---\ntitle: About\n---\nAbout us").unwrap();

        let stats = Builder::new(test_config(), Authors::builtin(), root.path())
            .build()
            .await
            .unwrap();

        assert_eq!(stats.items, 2);
        assert_eq!(stats.timed, 1);
        assert_eq!(stats.unresolved_authors, 0);

        let export = read_export(root.path());
        let post = export["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["url"] == "/posts/hello/")
            .unwrap();
        assert_eq!(post["author"]["name"], "Nathan Jones");
        assert_eq!(post["readingTime"], 1);
        assert_eq!(post["data"]["tags"], serde_json::json!(["posts", "rust"]));
        assert_eq!(export["collections"]["tagList"], serde_json::json!(["posts"]));
    }

    #[tokio::test]
    async fn test_unresolved_author_does_not_fail_build() {
        let root = TempDir::new().unwrap();
        let posts = root.path().join("src/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("guest.md"), "---\nauthor: ghost\n---\nBoo").unwrap();

        let stats = Builder::new(test_config(), Authors::builtin(), root.path())
            .build()
            .await
            .unwrap();
        assert_eq!(stats.unresolved_authors, 1);

        let export = read_export(root.path());
        assert!(export["items"][0].get("author").is_none());
    }

    #[tokio::test]
    async fn test_build_with_output_override_and_favicon() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("src")).unwrap();
        fs::write(root.path().join("src/favicon.ico"), "icon").unwrap();
        let out = root.path().join("public");

        let stats = Builder::new(test_config(), Authors::builtin(), root.path())
            .with_output_dir(&out)
            .build()
            .await
            .unwrap();

        assert_eq!(stats.passthrough, 1);
        assert!(out.join("favicon.ico").exists());
        assert!(out.join(SITE_DATA_FILE).exists());
    }
}
