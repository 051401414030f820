//! Config command - print the resolved configuration

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use engblog_core::ConfigResolver;

/// Run the config command.
pub fn run(root: &Path) -> Result<()> {
    let resolver = ConfigResolver::new(root);
    for file in resolver.candidate_files() {
        let marker = if file.exists() { "✓" } else { "-" };
        println!("  {marker} {}", file.display());
    }

    let config = resolver.load().wrap_err("Failed to load configuration")?;

    println!();
    println!("Resolved Config:");
    println!("{}", serde_json::to_string_pretty(&config.properties())?);

    Ok(())
}
