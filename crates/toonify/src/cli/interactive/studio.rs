//! Guided transformation flow.
//!
//! Walks the user through: API key → photo → style → artists → generate →
//! save / retry / start over. One [`Session`] lives for the whole flow, so
//! style and search text survive a start-over just like a reset does.

use console::Style;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use toonify_core::catalog::{Artist, ART_STYLES};
use toonify_core::session::save_png;
use toonify_core::{Config, Session, Studio, ToggleOutcome, TransformationResult, MAX_ARTISTS};

use super::setup;
use super::theme::toonify_theme;
use crate::cli::transform::{expand_path, generate_with_spinner, print_summary};

/// What to do after a transformation attempt.
enum Next {
    Retry,
    StartOver,
    Menu,
}

/// Walk the user through a full transformation.
pub async fn guided_transform(config: &Config) -> anyhow::Result<()> {
    let Some(api_key) = setup::ensure_api_key(config)? else {
        return Ok(());
    };
    let session = Session::from_config(config, api_key.as_override(), None);

    loop {
        if !choose_photo(&session).await? {
            return Ok(());
        }
        if !choose_style(&session)? || !choose_artists(&session)? {
            return Ok(());
        }

        loop {
            match run_once(config, &session).await? {
                Next::Retry => continue,
                Next::StartOver => {
                    session.reset();
                    break;
                }
                Next::Menu => return Ok(()),
            }
        }
    }
}

/// Prompt for a photo until one loads. `false` on cancel.
async fn choose_photo(session: &Session) -> anyhow::Result<bool> {
    let theme = toonify_theme();
    let warn = Style::new().for_stderr().yellow();
    let dim = Style::new().for_stderr().dim();

    loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path to your photo")
                .interact_text(),
        )?
        else {
            return Ok(false);
        };

        let path = expand_path(&PathBuf::from(raw_path.trim()));
        match session.load_file(&path).await {
            Ok(()) => {
                if let Some((name, mime, len)) = session.with_studio(|s| {
                    s.source().map(|src| {
                        (
                            src.file_name().to_string(),
                            src.mime_type().to_string(),
                            src.len(),
                        )
                    })
                }) {
                    eprintln!(
                        "  {}",
                        dim.apply_to(format!(
                            "Loaded {name} ({mime}, {:.1} KB)",
                            len as f64 / 1024.0
                        ))
                    );
                }
                return Ok(true);
            }
            Err(e) => eprintln!("  {}", warn.apply_to(e.to_string())),
        }
    }
}

/// Pick a style from the catalog. `false` on cancel.
fn choose_style(session: &Session) -> anyhow::Result<bool> {
    let theme = toonify_theme();
    let current = session.with_studio(|s| s.style().id);
    let items: Vec<String> = ART_STYLES
        .iter()
        .map(|s| format!("{:<14} {}", s.name, s.description))
        .collect();
    let default = ART_STYLES.iter().position(|s| s.id == current).unwrap_or(0);

    let Some(choice) = Select::with_theme(&theme)
        .with_prompt("Art style")
        .items(&items)
        .default(default)
        .interact_opt()?
    else {
        return Ok(false);
    };

    session.with_studio(|s| s.set_style(&ART_STYLES[choice]));
    Ok(true)
}

/// Search and toggle artist influences until the user continues. `false` on cancel.
fn choose_artists(session: &Session) -> anyhow::Result<bool> {
    let theme = toonify_theme();
    let dim = Style::new().for_stderr().dim();

    loop {
        let studio = session.snapshot();
        eprintln!(
            "  {}",
            dim.apply_to(format!(
                "Influences ({}/{MAX_ARTISTS}): {}",
                studio.artists().len(),
                selection_label(&studio)
            ))
        );

        let search_label = if studio.search().is_empty() {
            "Browse / search artists".to_string()
        } else {
            format!("Browse / search artists (filter: \"{}\")", studio.search())
        };
        let items = [
            "Continue".to_string(),
            search_label,
            "Clear influences".to_string(),
        ];
        let Some(choice) = Select::with_theme(&theme)
            .with_prompt("Artist influences")
            .items(&items)
            .default(0)
            .interact_opt()?
        else {
            return Ok(false);
        };

        match choice {
            0 => return Ok(true),
            1 => pick_artist(session)?,
            _ => session.with_studio(|s| {
                let names = s.artists().names().to_vec();
                for name in names {
                    s.toggle_artist(&name);
                }
            }),
        }
    }
}

/// Update the search text, then toggle one artist from the filtered roster.
fn pick_artist(session: &Session) -> anyhow::Result<()> {
    let theme = toonify_theme();
    let warn = Style::new().for_stderr().yellow();

    let current = session.with_studio(|s| s.search().to_string());
    let Some(term) = super::handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Search by name or specialty (empty for all)")
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(());
    };
    session.with_studio(|s| s.set_search(term.trim()));

    let studio = session.snapshot();
    let artists = studio.filtered_artists();
    if artists.is_empty() {
        eprintln!("  {}", warn.apply_to("No artists match that search."));
        return Ok(());
    }

    let items: Vec<String> = artists
        .iter()
        .map(|a| artist_label(a, studio.artists().contains(a.name)))
        .collect();
    let Some(choice) = Select::with_theme(&theme)
        .with_prompt("Toggle an artist")
        .items(&items)
        .default(0)
        .max_length(12)
        .interact_opt()?
    else {
        return Ok(());
    };

    let name = artists[choice].name;
    if session.with_studio(|s| s.toggle_artist(name)) == ToggleOutcome::LimitReached {
        eprintln!(
            "  {}",
            warn.apply_to(format!(
                "At most {MAX_ARTISTS} artists can be blended. Remove one first."
            ))
        );
    }
    Ok(())
}

/// Generate, show the outcome, and ask what to do next.
async fn run_once(config: &Config, session: &Session) -> anyhow::Result<Next> {
    let theme = toonify_theme();
    let red = Style::new().for_stderr().red();

    let go = Confirm::with_theme(&theme)
        .with_prompt("Generate the illustration now?")
        .default(true)
        .interact_opt()?;
    if go != Some(true) {
        return Ok(Next::Menu);
    }

    match generate_with_spinner(session, true).await {
        Ok(result) => {
            let output = ask_output_path(config)?;
            match output {
                Some(path) => {
                    save_and_report(&result, &path).await;
                }
                None => eprintln!("  Result not saved."),
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!("  {} {e}", red.apply_to("✗"));
            eprintln!();
        }
    }

    let items = &[
        "Try again with the same photo",
        "Start over with a new photo",
        "Back to main menu",
    ];
    let next = Select::with_theme(&theme)
        .with_prompt("What next?")
        .items(items)
        .default(0)
        .interact_opt()?;

    Ok(match next {
        Some(0) => {
            if !choose_style(session)? || !choose_artists(session)? {
                Next::Menu
            } else {
                Next::Retry
            }
        }
        Some(1) => Next::StartOver,
        _ => Next::Menu,
    })
}

/// Write the PNG and print a summary. A failed write is reported, not fatal.
async fn save_and_report(result: &TransformationResult, path: &Path) -> bool {
    match save_png(result, path).await {
        Ok(saved) => {
            print_summary(result, &saved);
            true
        }
        Err(e) => {
            let red = Style::new().for_stderr().red();
            eprintln!();
            eprintln!(
                "  {} Could not save {}: {e}",
                red.apply_to("✗"),
                path.display()
            );
            eprintln!();
            false
        }
    }
}

/// Ask where to save the PNG. `None` skips saving.
fn ask_output_path(config: &Config) -> anyhow::Result<Option<PathBuf>> {
    let theme = toonify_theme();
    let Some(raw) = super::handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Save as (empty to skip)")
            .default(config.studio.output_file.clone())
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(expand_path(&PathBuf::from(raw))))
}

fn selection_label(studio: &Studio) -> String {
    if studio.artists().is_empty() {
        "none (standard toon)".to_string()
    } else {
        studio.artists().names().join(", ")
    }
}

fn artist_label(artist: &Artist, selected: bool) -> String {
    let mark = if selected { "✓" } else { " " };
    format!("{mark} {:<24} {}", artist.name, artist.specialty)
}
