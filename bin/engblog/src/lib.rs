//! engblog CLI Library
//!
//! Command implementations for the engblog binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, config)

pub mod cmd;

pub use engblog_core::{Authors, Config};
pub use engblog_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Author data files looked up under `src/_data`, in order.
pub const AUTHOR_FILES: [&str; 2] = ["authors.yaml", "authors.json"];

/// Load the authors directory for a project.
///
/// The first of [`AUTHOR_FILES`] present in `src/_data` replaces the built-in
/// roster.
pub fn load_authors(root: &std::path::Path) -> engblog_core::Result<Authors> {
    let data_dir = root.join("src").join("_data");
    match AUTHOR_FILES
        .iter()
        .map(|name| data_dir.join(name))
        .find(|path| path.exists())
    {
        Some(path) => Authors::load(&path),
        None => Ok(Authors::builtin()),
    }
}
