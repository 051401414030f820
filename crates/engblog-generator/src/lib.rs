//! engblog Generator Library
//!
//! Site composition on top of the host generator.
//!
//! # Modules
//!
//! - [`filters`] - Name-keyed template filters
//! - [`computed`] - Per-item computed fields (author, reading time)
//! - [`collections`] - Collections over all content items
//! - [`plugins`] - Plugin composition and host settings
//! - [`passthrough`] - Verbatim file copies to the output root
//! - [`collector`] - Content collection from the input directory
//! - [`build`] - Build orchestration

pub mod build;
pub mod collections;
pub mod collector;
pub mod computed;
pub mod filters;
pub mod passthrough;
pub mod plugins;

pub use build::{BuildStats, Builder};
pub use collections::CollectionApi;
pub use collector::ContentCollector;
pub use computed::{ComputedData, ComputedFields, ComputedItem, DirectoryData};
pub use filters::FilterRegistry;
pub use passthrough::Passthrough;
pub use plugins::{HostConfig, Plugin, SiteSettings, compose};
