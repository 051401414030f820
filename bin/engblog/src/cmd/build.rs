//! Build command - resolves site data for the renderer

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use engblog_core::Config;
use engblog_generator::Builder;

/// Run the build command.
pub async fn run(root: &Path, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?root, ?output, "Starting build");

    let config = Config::load(root).wrap_err("Failed to load configuration")?;
    tracing::info!(properties = %config.properties(), "Resolved config");

    let authors = crate::load_authors(root).wrap_err("Failed to load authors")?;

    let mut builder = Builder::new(config, authors, root);
    if let Some(output) = output {
        builder = builder.with_output_dir(output);
    }

    let stats = builder.build().await.wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Items:        {}", stats.items);
    println!("  Timed:        {}", stats.timed);
    println!("  Passthrough:  {}", stats.passthrough);
    if stats.unresolved_authors > 0 {
        println!("  Unresolved authors: {}", stats.unresolved_authors);
    }
    println!();
    println!("  Duration:     {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
