//! The `toonify transform` command.

use clap::Args;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use toonify_core::catalog;
use toonify_core::{
    Config, ResultSummary, Session, ToggleOutcome, TransformationResult, MAX_ARTISTS,
};

/// Arguments for the `transform` command.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Photo to transform
    #[arg(required = true)]
    pub image: PathBuf,

    /// Style key (see `toonify styles`); defaults to the configured style
    #[arg(short, long)]
    pub style: Option<String>,

    /// Artist to blend in; repeat for up to three
    #[arg(short, long = "artist", value_name = "NAME")]
    pub artists: Vec<String>,

    /// Where to write the PNG (defaults to `studio.output_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gemini API key (overrides the config file)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name
    #[arg(long)]
    pub model: Option<String>,

    /// Print a JSON summary to stdout
    #[arg(long)]
    pub json: bool,
}

/// Execute the transform command.
pub async fn execute(config: &Config, args: TransformArgs) -> anyhow::Result<()> {
    let session = Session::from_config(config, args.api_key.as_deref(), args.model.as_deref());

    if let Some(key) = &args.style {
        session.with_studio(|s| s.set_style_key(key))?;
    }
    for warning in apply_artists(&session, &args.artists) {
        tracing::warn!("{warning}");
    }

    session.load_file(&args.image).await?;

    let result = generate_with_spinner(&session, !args.json).await?;

    let output = match &args.output {
        Some(path) => expand_path(path),
        None => config.output_path(),
    };
    let saved = session.save_result(&output).await?;

    let source_bytes = session
        .with_studio(|s| s.source().map(|src| src.len()))
        .unwrap_or_default();
    let summary = ResultSummary {
        style: result.style,
        influences: result.influences.clone(),
        source_bytes: source_bytes as usize,
        output_bytes: result.png_bytes().map(|b| b.len()).unwrap_or_default(),
        saved_to: Some(saved.display().to_string()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&result, &saved);
    }

    Ok(())
}

/// Toggle each requested artist on, resolving names against the roster.
///
/// Returns one warning per name that was skipped.
pub fn apply_artists(session: &Session, names: &[String]) -> Vec<String> {
    let mut warnings = Vec::new();
    for name in names {
        let Some(artist) = catalog::artist(name) else {
            warnings.push(format!(
                "Unknown artist \"{name}\" (see `toonify artists`), skipping"
            ));
            continue;
        };
        if session.with_studio(|s| s.artists().contains(artist.name)) {
            continue;
        }
        if session.with_studio(|s| s.toggle_artist(artist.name)) == ToggleOutcome::LimitReached {
            warnings.push(format!(
                "At most {MAX_ARTISTS} artists can be blended, ignoring {}",
                artist.name
            ));
        }
    }
    warnings
}

/// Run `session.generate()` behind a spinner showing the rotating status message.
pub async fn generate_with_spinner(
    session: &Session,
    show_spinner: bool,
) -> toonify_core::Result<TransformationResult> {
    let progress = if show_spinner {
        create_spinner()
    } else {
        ProgressBar::hidden()
    };

    let mut status = session.subscribe_status();
    let follower = {
        let progress = progress.clone();
        tokio::spawn(async move {
            while status.changed().await.is_ok() {
                let msg = *status.borrow_and_update();
                progress.set_message(msg);
            }
        })
    };

    let start = Instant::now();
    let result = session.generate().await;
    follower.abort();

    match &result {
        Ok(_) => progress.finish_with_message(format!(
            "Done in {:.1}s",
            start.elapsed().as_secs_f64()
        )),
        Err(_) => progress.abandon(),
    }
    result
}

/// Spinner for the in-flight request.
fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(catalog::LOADING_MESSAGES[0]);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Print a short human-readable result block to stderr.
pub fn print_summary(result: &TransformationResult, saved: &Path) {
    let green = Style::new().for_stderr().green();
    let label = Style::new().for_stderr().bold();

    eprintln!();
    eprintln!("  {} Transformation complete", green.apply_to("✓"));
    eprintln!("    {:<12} {}", label.apply_to("Style:"), result.style);
    eprintln!(
        "    {:<12} {}",
        label.apply_to("Influences:"),
        result.influence_label()
    );
    eprintln!("    {:<12} {}", label.apply_to("Saved to:"), saved.display());
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::from_config(&Config::default(), Some("test-key"), None)
    }

    #[test]
    fn apply_artists_resolves_case_insensitively() {
        let session = session();
        let warnings = apply_artists(&session, &["jim lee".to_string(), "JOCK".to_string()]);
        assert!(warnings.is_empty());
        let names = session.with_studio(|s| s.artists().names().to_vec());
        assert_eq!(names, vec!["Jim Lee", "Jock"]);
    }

    #[test]
    fn apply_artists_skips_unknown_and_duplicates() {
        let session = session();
        let names = ["Jock", "Nobody Real", "jock"].map(String::from);
        let warnings = apply_artists(&session, &names);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Nobody Real"));
        assert_eq!(session.with_studio(|s| s.artists().len()), 1);
    }

    #[test]
    fn apply_artists_warns_past_the_limit() {
        let session = session();
        let names = ["Jim Lee", "Jock", "Sana Takeda", "Peach Momoko"].map(String::from);
        let warnings = apply_artists(&session, &names);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Peach Momoko"));
        assert!(session.with_studio(|s| s.artists().is_full()));
    }

    #[test]
    fn expand_path_leaves_plain_paths() {
        assert_eq!(expand_path(Path::new("out/x.png")), PathBuf::from("out/x.png"));
    }

    #[tokio::test]
    async fn generate_with_spinner_reports_missing_photo() {
        let session = session();
        let err = generate_with_spinner(&session, false).await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a photo first.");
    }
}
