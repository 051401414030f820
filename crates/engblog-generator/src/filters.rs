//! Template filters.
//!
//! Filters are pure functions over template values, looked up by name.

use std::collections::BTreeMap;

use engblog_core::value::into_items;
pub use engblog_core::value::array;
use serde_json::Value;

/// Tags every site uses internally for collections and navigation.
pub const DEFAULT_TAGS: [&str; 4] = ["all", "nav", "post", "posts"];

/// A template filter.
pub type Filter = fn(&Value) -> Value;

fn is_default_tag(tag: &str) -> bool {
    DEFAULT_TAGS.contains(&tag)
}

/// Tags outside [`DEFAULT_TAGS`], in input order.
pub fn custom_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| !is_default_tag(tag))
        .map(str::to_string)
        .collect()
}

/// Tags inside [`DEFAULT_TAGS`], in input order.
pub fn filter_tag_list<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| is_default_tag(tag))
        .map(str::to_string)
        .collect()
}

fn retain_tags(value: &Value, keep_default: bool) -> Value {
    Value::Array(
        into_items(value.clone())
            .into_iter()
            .filter(|item| match item.as_str() {
                Some(tag) => is_default_tag(tag) == keep_default,
                None => !keep_default,
            })
            .collect(),
    )
}

fn custom_tags_filter(value: &Value) -> Value {
    retain_tags(value, false)
}

fn filter_tag_list_filter(value: &Value) -> Value {
    retain_tags(value, true)
}

/// Name-keyed filter table.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, Filter>,
}

impl FilterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every filter the site ships.
    #[must_use]
    pub fn discover() -> Self {
        let mut registry = Self::new();
        registry.register("array", array);
        registry.register("customTags", custom_tags_filter);
        registry.register("filterTagList", filter_tag_list_filter);
        registry
    }

    /// Register a filter under a name. Registering a name again replaces it.
    pub fn register(&mut self, name: impl Into<String>, filter: Filter) {
        self.filters.insert(name.into(), filter);
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<Filter> {
        self.filters.get(name).copied()
    }

    /// Apply a named filter.
    pub fn apply(&self, name: &str, value: &Value) -> Option<Value> {
        self.get(name).map(|filter| filter(value))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Iterate over name and filter pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Filter)> {
        self.filters.iter().map(|(name, filter)| (name.as_str(), *filter))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
