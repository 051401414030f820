//! engblog Core Library
//!
//! Configuration, content items and site data providers for the engineering blog.

pub mod authors;
pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod metadata;
pub mod value;

pub use authors::{Author, AuthorRecord, Authors};
pub use config::{Config, ConfigResolver, EnvVars};
pub use content::{ContentItem, TemplateFormat};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use metadata::Metadata;
