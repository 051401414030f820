//! Authors directory.
//!
//! Authors are built once from a static list of records. Templates see each
//! author with its derived social URLs.

use std::{collections::HashMap, path::Path, sync::Arc};

use serde::{Deserialize, Serialize, ser::SerializeStruct};

use crate::error::Result;

/// An author record as declared in site data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub linked_in: String,
    #[serde(default)]
    pub img: String,
}

/// An author with derived profile URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub twitter_handle: String,
    pub linked_in_handle: String,
    pub img: String,
}

impl Author {
    /// Twitter profile URL. Handles are not validated.
    pub fn twitter_url(&self) -> String {
        format!("https://twitter.com/{}", self.twitter_handle)
    }

    /// LinkedIn profile URL. Handles are not validated.
    pub fn linked_in_url(&self) -> String {
        format!("https://www.linkedin.com/in/{}/", self.linked_in_handle)
    }
}

impl From<AuthorRecord> for Author {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            twitter_handle: record.twitter,
            linked_in_handle: record.linked_in,
            img: record.img,
        }
    }
}

impl Serialize for Author {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Author", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("twitterHandle", &self.twitter_handle)?;
        state.serialize_field("linkedInHandle", &self.linked_in_handle)?;
        state.serialize_field("img", &self.img)?;
        state.serialize_field("twitterUrl", &self.twitter_url())?;
        state.serialize_field("linkedInUrl", &self.linked_in_url())?;
        state.end()
    }
}

/// Ordered authors list with an id index.
#[derive(Debug, Clone, Default)]
pub struct Authors {
    list: Vec<Arc<Author>>,
    by_id: HashMap<String, Arc<Author>>,
}

impl Authors {
    /// Build the directory from records, keeping their order.
    ///
    /// A repeated id keeps both list entries; the index points at the last one.
    pub fn from_records(records: impl IntoIterator<Item = AuthorRecord>) -> Self {
        let list: Vec<Arc<Author>> = records
            .into_iter()
            .map(|record| Arc::new(Author::from(record)))
            .collect();
        let by_id = list
            .iter()
            .map(|author| (author.id.clone(), Arc::clone(author)))
            .collect();
        Self { list, by_id }
    }

    /// The site's own authors.
    pub fn builtin() -> Self {
        Self::from_records([AuthorRecord {
            id: "nathan".to_string(),
            name: "Nathan Jones".to_string(),
            twitter: "_ncjones".to_string(),
            linked_in: "nathan-c-jones".to_string(),
            img: "/img/nathan-bfde749b7bf5332e977dc6f3da9ba51b.jpg".to_string(),
        }])
    }

    /// Load records from a YAML or JSON data file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<AuthorRecord> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        tracing::debug!(path = %path.display(), count = records.len(), "loaded authors");
        Ok(Self::from_records(records))
    }

    /// Authors in declaration order.
    pub fn list(&self) -> &[Arc<Author>] {
        &self.list
    }

    /// Look up an author by id.
    pub fn get(&self, id: &str) -> Option<&Arc<Author>> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
