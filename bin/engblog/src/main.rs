//! engblog CLI
//!
//! Resolves configuration and site data for the engineering blog.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for engblog.
#[derive(Parser)]
#[command(
    name = "engblog",
    version,
    about = "Site data and configuration for the engineering blog"
)]
struct Cli {
    /// Project root containing config files and the input directory
    #[arg(short, long, default_value = ".")]
    root: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site data export
    Build {
        /// Output directory (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    engblog::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output } => {
            engblog::cmd::build::run(&cli.root, output.as_deref()).await?;
        }
        Commands::Check { strict } => {
            engblog::cmd::check::run(&cli.root, strict)?;
        }
        Commands::Config => {
            engblog::cmd::config::run(&cli.root)?;
        }
    }

    Ok(())
}
