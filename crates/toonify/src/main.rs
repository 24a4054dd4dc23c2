//! Toonify CLI - Turn photos into comic-book illustrations.
//!
//! Toonify sends a photo to Gemini together with a rendering style and up to
//! three comic artists whose styles are blended into the result, then saves
//! the generated PNG.
//!
//! # Usage
//!
//! ```bash
//! # Transform a photo with the default style
//! toonify transform me.jpg
//!
//! # Pick a style and blend two artists
//! toonify transform me.jpg --style anime-manga --artist "Jim Lee" --artist Jock
//!
//! # Browse the catalog
//! toonify styles
//! toonify artists --search noir
//!
//! # Guided mode
//! toonify
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Toonify - Turn photos into comic-book illustrations.
#[derive(Parser, Debug)]
#[command(name = "toonify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform a photo into a stylized illustration
    Transform(cli::transform::TransformArgs),

    /// List the available rendering styles
    Styles,

    /// List (and search) the artist catalog
    Artists(cli::catalog::ArtistsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match toonify_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `toonify config path`."
            );
            toonify_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Toonify v{}", toonify_core::VERSION);

    match cli.command {
        Some(Commands::Transform(args)) => cli::transform::execute(&config, args).await,
        Some(Commands::Styles) => cli::catalog::execute_styles(),
        Some(Commands::Artists(args)) => cli::catalog::execute_artists(args),
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
