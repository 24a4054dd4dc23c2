//! The `toonify styles` and `toonify artists` commands.

use clap::Args;
use toonify_core::catalog::{self, Artist, ART_STYLES};

/// Arguments for the `artists` command.
#[derive(Args, Debug)]
pub struct ArtistsArgs {
    /// Only show artists whose name or specialty contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print the style catalog, default first.
pub fn execute_styles() -> anyhow::Result<()> {
    let key_width = ART_STYLES.iter().map(|s| s.id.key().len()).max().unwrap_or(0);
    for style in ART_STYLES {
        println!(
            "{:<key_width$}  {:<14} {}",
            style.id.key(),
            style.name,
            style.description
        );
    }
    Ok(())
}

/// Print the (optionally filtered) artist roster.
pub fn execute_artists(args: ArtistsArgs) -> anyhow::Result<()> {
    let term = args.search.as_deref().unwrap_or("");
    let artists = catalog::search_artists(term);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&artists)?);
        return Ok(());
    }

    if artists.is_empty() {
        eprintln!("No artists match \"{term}\".");
        return Ok(());
    }

    print!("{}", format_artists(&artists));
    Ok(())
}

/// One artist per line, names padded into a column.
fn format_artists(artists: &[&Artist]) -> String {
    let width = artists.iter().map(|a| a.name.len()).max().unwrap_or(0);
    artists
        .iter()
        .map(|a| format!("{:<width$}  {}\n", a.name, a.specialty))
        .collect()
}
