//! Gemini API key detection, input, and optional persistence.

use console::Style;
use dialoguer::{Password, Select};
use std::path::Path;
use toonify_core::transform::resolve_env_var;
use toonify_core::Config;

use super::theme::toonify_theme;

/// Where the key for this session comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Already available from `GEMINI_API_KEY` or the config file
    Configured,
    /// Entered during this session
    Entered(String),
}

impl ApiKey {
    /// The override to hand to the session, if any.
    pub fn as_override(&self) -> Option<&str> {
        match self {
            ApiKey::Configured => None,
            ApiKey::Entered(key) => Some(key),
        }
    }
}

/// Make sure a Gemini key is available, prompting for one if not.
///
/// Returns `None` if the user skips or cancels.
pub fn ensure_api_key(config: &Config) -> anyhow::Result<Option<ApiKey>> {
    let dim = Style::new().for_stderr().dim();
    let warn = Style::new().for_stderr().yellow();

    if config_has_key(config) {
        eprintln!("  {}", dim.apply_to("Using Gemini API key from GEMINI_API_KEY / config"));
        return Ok(Some(ApiKey::Configured));
    }

    eprintln!("  {}", warn.apply_to("GEMINI_API_KEY not set."));

    let theme = toonify_theme();
    let key: String = match Password::with_theme(&theme)
        .with_prompt("Enter your Gemini API key (empty to cancel)")
        .allow_empty_password(true)
        .interact()
    {
        Ok(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => return Ok(None),
    };

    let save_options = &["Yes, save to config file", "No, use for this session only"];
    let save_choice = Select::with_theme(&theme)
        .with_prompt("Save this key for future sessions?")
        .items(save_options)
        .default(0)
        .interact_opt()?;

    match save_choice {
        Some(0) => {
            let path = Config::default_path();
            match save_key_to_config(&path, &key) {
                Ok(()) => eprintln!(
                    "  {}",
                    dim.apply_to(format!("Key saved to {}", path.display()))
                ),
                Err(e) => {
                    eprintln!("  {}", warn.apply_to(format!("Could not save to config: {e}")));
                    eprintln!("  Using key for this session only.");
                }
            }
            Ok(Some(ApiKey::Entered(key)))
        }
        Some(1) => Ok(Some(ApiKey::Entered(key))),
        _ => Ok(None),
    }
}

/// Whether the config (or the environment it references) yields a key.
pub(crate) fn config_has_key(config: &Config) -> bool {
    resolve_env_var(&config.gemini.api_key).is_some()
}

/// Write `key` under `[gemini] api_key`, preserving the rest of the file.
pub(crate) fn save_key_to_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = content.parse()?;

    if !doc.contains_key("gemini") {
        doc["gemini"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["gemini"]["api_key"] = toml_edit::value(key);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())?;
    Ok(())
}
