//! Site-wide metadata consumed by templates and feed generation.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub title: String,
    pub url: String,
}

/// Syndication feed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMetadata {
    pub subtitle: String,
    pub filename: String,
    pub path: String,
    /// Feed id; the raw base URL, `null` when unset.
    pub id: Option<String>,
}

/// JSON feed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFeedMetadata {
    pub path: String,
    pub url: String,
}

/// Site metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    /// Canonical site URL with trailing slash.
    pub url: String,
    pub github_url: String,
    pub twitter_url: String,
    pub linked_in_url: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub language: String,
    pub description: String,
    pub nav: Vec<NavEntry>,
    pub feed: FeedMetadata,
    pub jsonfeed: JsonFeedMetadata,
}

const DESCRIPTION: &str = "News and views from the Centrapay Engineering team";

impl Metadata {
    /// Assemble metadata for the resolved configuration.
    ///
    /// URLs are concatenated onto the base URL as is: an unset base URL gives
    /// `"/"` for the site URL.
    pub fn new(config: &Config) -> Self {
        let base_url = config.base_url_or_empty();
        Self {
            title: "Centrapay Engineering".to_string(),
            url: format!("{base_url}/"),
            github_url: "https://github.com/centrapay".to_string(),
            twitter_url: "https://twitter.com/centrapay".to_string(),
            linked_in_url: "https://www.linkedin.com/company/centrapay".to_string(),
            instagram_url: "https://www.instagram.com/centrapay".to_string(),
            facebook_url: "https://www.facebook.com/centrapay".to_string(),
            language: "en".to_string(),
            description: DESCRIPTION.to_string(),
            nav: vec![
                NavEntry {
                    title: "Home".to_string(),
                    url: "/".to_string(),
                },
                NavEntry {
                    title: "Archive".to_string(),
                    url: "/posts/".to_string(),
                },
            ],
            feed: FeedMetadata {
                subtitle: DESCRIPTION.to_string(),
                filename: "feed.xml".to_string(),
                path: "/feed/feed.xml".to_string(),
                id: config.base_url.clone(),
            },
            jsonfeed: JsonFeedMetadata {
                path: "/feed/feed.json".to_string(),
                url: format!("{base_url}/feed/feed.json"),
            },
        }
    }
}
