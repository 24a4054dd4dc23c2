//! Interactive CLI mode for bare `toonify` invocation.
//!
//! When `toonify` is invoked with no subcommand on a TTY, this module offers a
//! menu-driven studio built on the same session and helpers as the
//! flag-based commands.

pub mod setup;
pub mod studio;
pub mod theme;

use console::Style;
use dialoguer::Select;
use toonify_core::transform::resolve_env_var;
use toonify_core::{catalog, Config};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Wraps `interact_text()` / `interact()` calls that lack an `_opt` variant.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const MENU_ITEMS: &[&str] = &[
    "Transform a photo",
    "Browse styles and artists",
    "Configure settings",
    "Exit",
];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::toonify_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => studio::guided_transform(config).await?,
            Some(1) => show_catalog(),
            Some(2) => show_config(config)?,
            _ => break, // Exit or Ctrl+C / Esc
        }
    }

    Ok(())
}

/// Print the style catalog and the full roster.
fn show_catalog() {
    let accent = Style::new().for_stderr().magenta();
    let dim = Style::new().for_stderr().dim();

    eprintln!();
    eprintln!("  {}", accent.apply_to("Styles:"));
    for style in catalog::ART_STYLES {
        eprintln!(
            "    {:<16} {}",
            style.name,
            dim.apply_to(style.description)
        );
    }
    eprintln!();
    eprintln!("  {}", accent.apply_to(format!("Artists ({}):", catalog::ARTISTS.len())));
    for artist in catalog::ARTISTS {
        eprintln!("    {:<24} {}", artist.name, dim.apply_to(artist.specialty));
    }
    eprintln!();
}

/// Summary of the current settings, with options to dump the TOML or path.
fn show_config(config: &Config) -> anyhow::Result<()> {
    let theme = theme::toonify_theme();
    let dim = Style::new().for_stderr().dim();
    let accent = Style::new().for_stderr().magenta();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", accent.apply_to("Current configuration:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };
        let key_note = if resolve_env_var(&config.gemini.api_key).is_some() {
            "configured"
        } else {
            "missing"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!("    {:<20} {}", label.apply_to("Model:"), config.gemini.model);
        eprintln!("    {:<20} {}", label.apply_to("API key:"), key_note);
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Default style:"),
            config.default_style().name
        );
        eprintln!(
            "    {:<20} {} MB",
            label.apply_to("Max photo size:"),
            config.limits.max_file_size_mb
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Output file:"),
            config.output_path().display()
        );
        eprintln!("    {:<20} {}", label.apply_to("Log level:"), config.logging.level);
        eprintln!();

        let items = &["View full config (TOML)", "Show config file path", "Back"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Configuration")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => {
                let mut shown = config.clone();
                shown.gemini.api_key = super::config::redact_key(&shown.gemini.api_key);
                match shown.to_toml() {
                    Ok(toml) => {
                        eprintln!();
                        eprintln!("{}", dim.apply_to("─".repeat(50)));
                        eprintln!("{toml}");
                        eprintln!("{}", dim.apply_to("─".repeat(50)));
                        eprintln!();
                    }
                    Err(e) => {
                        let err = Style::new().for_stderr().red();
                        eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                        eprintln!();
                    }
                }
            }
            Some(1) => {
                eprintln!();
                eprintln!("  {}", Config::default_path().display());
                eprintln!();
            }
            _ => break,
        }
    }

    Ok(())
}
