//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use engblog_core::{Authors, Config};
use engblog_generator::{
    ContentCollector, ComputedItem, HostConfig, compose, plugins::SiteSettings,
};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration, content front matter, author references and
/// passthrough files. With `strict`, warnings fail the check too.
pub fn run(root: &Path, strict: bool) -> Result<()> {
    tracing::info!(?root, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load(root) {
        Ok(config) => {
            println!("  ✓ Configuration valid (env: {})", config.env);
            if config.base_url.is_none() {
                result.add_warning("baseUrl is not set; site URLs will be relative");
            }
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    let mut host = HostConfig::new();
    let settings = compose(&mut host);

    println!("\nChecking authors...");
    let authors = match crate::load_authors(root) {
        Ok(authors) => {
            println!("  ✓ {} author(s)", authors.len());
            Some(authors)
        }
        Err(e) => {
            result.add_error(format!("Authors error: {e}"));
            None
        }
    };

    println!("\nChecking content files...");
    match ContentCollector::new(root.join(&settings.dir.input)).collect() {
        Ok(items) => {
            println!("  ✓ {} content item(s) parsed", items.len());
            if let Some(ref authors) = authors {
                check_authors(&items, authors, &mut result);
            }
        }
        Err(e) => result.add_error(format!("Content error: {e}")),
    }

    println!("\nChecking passthrough files...");
    check_passthrough(root, &host, &settings, &mut result);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Report author ids that resolve to nothing.
///
/// Rendering leaves these items without an author, so surface them here.
fn check_authors(items: &[ComputedItem], authors: &Authors, result: &mut ValidationResult) {
    let mut unresolved = 0;
    for item in items {
        if let Some(id) = item.item.data.author.as_deref()
            && authors.get(id).is_none()
        {
            result.add_warning(format!(
                "Unknown author `{id}` in {}",
                item.item.input_path.display()
            ));
            unresolved += 1;
        }
    }

    if unresolved == 0 {
        println!("  ✓ All author references resolve");
    } else {
        println!("  ⚠ {unresolved} unresolved author reference(s)");
    }
}

fn check_passthrough(
    root: &Path,
    host: &HostConfig,
    settings: &SiteSettings,
    result: &mut ValidationResult,
) {
    for path in host.passthrough_copies() {
        if root.join(path).is_file() {
            println!("  ✓ {}", path.display());
        } else {
            result.add_warning(format!(
                "Passthrough file {} not found; it will not be copied to {}",
                path.display(),
                settings.dir.output.display()
            ));
        }
    }
}
