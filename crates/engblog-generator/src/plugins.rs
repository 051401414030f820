//! Plugin composition.
//!
//! The host generator hands a [`HostConfig`] to each plugin in turn. Local
//! plugins add filters and collections; external rendering plugins are only
//! recorded by name, their behaviour belongs to the host.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    collections::{CollectionApi, tag_list, tag_set},
    filters::{Filter, FilterRegistry},
};

/// A collection builder registered on the host.
pub type Collection = Arc<dyn Fn(&CollectionApi<'_>) -> Value + Send + Sync>;

/// A unit of host configuration.
pub trait Plugin {
    /// Name the host records for this plugin.
    fn name(&self) -> &str;

    /// Apply this plugin's registrations.
    fn register(&self, host: &mut HostConfig);
}

/// Configuration object of the host generator.
#[derive(Default)]
pub struct HostConfig {
    data_deep_merge: bool,
    plugins: Vec<String>,
    filters: FilterRegistry,
    collections: BTreeMap<String, Collection>,
    passthrough: Vec<PathBuf>,
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("data_deep_merge", &self.data_deep_merge)
            .field("plugins", &self.plugins)
            .field("filters", &self.filters.names().collect::<Vec<_>>())
            .field("collections", &self.collections.keys().collect::<Vec<_>>())
            .field("passthrough", &self.passthrough)
            .finish()
    }
}

impl HostConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge data cascade values deeply instead of replacing them.
    pub fn set_data_deep_merge(&mut self, enabled: bool) {
        self.data_deep_merge = enabled;
    }

    /// Register a plugin: record it, then let it add its registrations.
    pub fn add_plugin(&mut self, plugin: &dyn Plugin) {
        debug!(plugin = plugin.name(), "registering plugin");
        self.plugins.push(plugin.name().to_string());
        plugin.register(self);
    }

    pub fn add_filter(&mut self, name: impl Into<String>, filter: Filter) {
        self.filters.register(name, filter);
    }

    pub fn add_collection(&mut self, name: impl Into<String>, collection: Collection) {
        self.collections.insert(name.into(), collection);
    }

    /// Copy a file verbatim to the output root.
    pub fn add_passthrough_copy(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.passthrough.contains(&path) {
            self.passthrough.push(path);
        }
    }

    pub fn data_deep_merge(&self) -> bool {
        self.data_deep_merge
    }

    /// Plugin names in registration order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Evaluate every registered collection over the given items.
    pub fn build_collections(&self, api: &CollectionApi<'_>) -> BTreeMap<String, Value> {
        self.collections
            .iter()
            .map(|(name, collection)| (name.clone(), collection(api)))
            .collect()
    }

    pub fn passthrough_copies(&self) -> &[PathBuf] {
        &self.passthrough
    }
}

/// A rendering plugin provided by the host ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalPlugin(pub &'static str);

impl ExternalPlugin {
    /// Syndication feed generation.
    pub const RSS: Self = Self("rss");
    /// Code block syntax highlighting.
    pub const SYNTAX_HIGHLIGHT: Self = Self("syntaxhighlight");
    /// Navigation menus.
    pub const NAVIGATION: Self = Self("navigation");
}

impl Plugin for ExternalPlugin {
    fn name(&self) -> &str {
        self.0
    }

    fn register(&self, _host: &mut HostConfig) {}
}

/// Exposes the filter registry to templates.
#[derive(Debug, Clone)]
pub struct FiltersPlugin {
    registry: FilterRegistry,
}

impl FiltersPlugin {
    #[must_use]
    pub fn new(registry: FilterRegistry) -> Self {
        Self { registry }
    }
}

impl Plugin for FiltersPlugin {
    fn name(&self) -> &str {
        "filters"
    }

    fn register(&self, host: &mut HostConfig) {
        for (name, filter) in self.registry.iter() {
            host.add_filter(name, filter);
        }
    }
}

/// Registers the site collections.
///
/// `tagList` applies the host's `filterTagList` filter as registered when this
/// plugin runs, so the filters plugin must come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionsPlugin;

impl Plugin for CollectionsPlugin {
    fn name(&self) -> &str {
        "collections"
    }

    fn register(&self, host: &mut HostConfig) {
        let collection: Collection = match host.filters().get("filterTagList") {
            Some(filter) => Arc::new(move |api: &CollectionApi<'_>| {
                filter(&Value::from(tag_set(api)))
            }),
            None => {
                warn!("filterTagList is not registered, tagList uses the built-in tag filter");
                Arc::new(|api: &CollectionApi<'_>| Value::from(tag_list(api)))
            }
        };
        host.add_collection("tagList", collection);
    }
}

/// Template engine setting; `Disabled` serializes as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSetting {
    Disabled,
    Engine(String),
}

impl Serialize for EngineSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Engine(name) => serializer.serialize_str(name),
        }
    }
}

/// Input and output directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirSettings {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Settings returned to the host after composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub template_formats: Vec<String>,
    pub markdown_template_engine: EngineSetting,
    pub html_template_engine: EngineSetting,
    pub data_template_engine: EngineSetting,
    pub dir: DirSettings,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            template_formats: vec!["md".to_string(), "njk".to_string(), "html".to_string()],
            markdown_template_engine: EngineSetting::Engine("njk".to_string()),
            html_template_engine: EngineSetting::Engine("njk".to_string()),
            data_template_engine: EngineSetting::Disabled,
            dir: DirSettings {
                input: PathBuf::from("src"),
                output: PathBuf::from("dist"),
            },
        }
    }
}

/// Static file copied to the output root.
pub const FAVICON: &str = "src/favicon.ico";

/// Register every plugin in order and return the host settings.
pub fn compose(host: &mut HostConfig) -> SiteSettings {
    host.set_data_deep_merge(true);

    host.add_plugin(&ExternalPlugin::RSS);
    host.add_plugin(&ExternalPlugin::SYNTAX_HIGHLIGHT);
    host.add_plugin(&ExternalPlugin::NAVIGATION);

    for plugin in local_plugins() {
        host.add_plugin(plugin.as_ref());
    }

    host.add_passthrough_copy(Path::new(FAVICON));

    SiteSettings::default()
}

/// Plugins defined by this site.
pub fn local_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(FiltersPlugin::new(FilterRegistry::discover())),
        Box::new(CollectionsPlugin),
    ]
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use engblog_core::{ContentItem, Frontmatter};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_compose_registers_in_order() {
        let mut host = HostConfig::new();
        compose(&mut host);

        assert!(host.data_deep_merge());
        assert_eq!(
            host.plugins(),
            &["rss", "syntaxhighlight", "navigation", "filters", "collections"]
        );
        assert_eq!(host.passthrough_copies(), &[PathBuf::from("src/favicon.ico")]);
    }

    #[test]
    fn test_compose_exposes_filters_and_collections() {
        let mut host = HostConfig::new();
        compose(&mut host);

        let names: Vec<_> = host.filters().names().collect();
        assert_eq!(names, vec!["array", "customTags", "filterTagList"]);
        assert!(host.collection("tagList").is_some());
    }

    #[test]
    fn test_tag_list_collection() {
        let mut host = HostConfig::new();
        compose(&mut host);

        let items = [
            ContentItem::new(
                Path::new("src"),
                Path::new("src/posts/a.md"),
                Frontmatter {
                    tags: vec!["posts".to_string(), "rust".to_string()],
                    ..Default::default()
                },
            )
            .expect("item"),
        ];
        let collections = host.build_collections(&CollectionApi::new(&items));
        assert_eq!(collections["tagList"], json!(["posts"]));
    }

    fn overridden(_: &Value) -> Value {
        json!(["OVERRIDDEN"])
    }

    #[test]
    fn test_tag_list_reads_registered_filter() {
        let items = [ContentItem::new(
            Path::new("src"),
            Path::new("src/posts/a.md"),
            Frontmatter {
                tags: vec!["posts".to_string(), "rust".to_string()],
                ..Default::default()
            },
        )
        .expect("item")];
        let api = CollectionApi::new(&items);

        let mut before = HostConfig::new();
        before.add_plugin(&FiltersPlugin::new(FilterRegistry::discover()));
        before.add_filter("filterTagList", overridden);
        before.add_plugin(&CollectionsPlugin);
        assert_eq!(before.build_collections(&api)["tagList"], json!(["OVERRIDDEN"]));

        let mut after = HostConfig::new();
        after.add_plugin(&FiltersPlugin::new(FilterRegistry::discover()));
        after.add_plugin(&CollectionsPlugin);
        after.add_filter("filterTagList", overridden);
        assert_eq!(after.build_collections(&api)["tagList"], json!(["posts"]));

        let mut without_filters = HostConfig::new();
        without_filters.add_plugin(&CollectionsPlugin);
        assert_eq!(
            without_filters.build_collections(&api)["tagList"],
            json!(["posts"])
        );
    }

    #[test]
    fn test_settings_serialize() {
        let mut host = HostConfig::new();
        let settings = compose(&mut host);
        let json = serde_json::to_value(&settings).expect("json");

        assert_eq!(json["templateFormats"], json!(["md", "njk", "html"]));
        assert_eq!(json["markdownTemplateEngine"], "njk");
        assert_eq!(json["htmlTemplateEngine"], "njk");
        assert_eq!(json["dataTemplateEngine"], false);
        assert_eq!(json["dir"]["input"], "src");
        assert_eq!(json["dir"]["output"], "dist");
    }

    #[test]
    fn test_passthrough_is_idempotent() {
        let mut host = HostConfig::new();
        host.add_passthrough_copy("src/favicon.ico");
        host.add_passthrough_copy("src/favicon.ico");
        assert_eq!(host.passthrough_copies().len(), 1);
    }
}
