//! Dialoguer theme and banner for Toonify interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` in Toonify's colours: magenta prompts and selection,
/// green success, red errors.
pub fn toonify_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta(),
        checked_item_prefix: style("✓".to_string()).for_stderr().green(),
        unchecked_item_prefix: style("·".to_string()).for_stderr().bright().black(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Print the Toonify banner to stderr.
pub fn print_banner() {
    let title = format!("Toonify v{}", toonify_core::VERSION);
    let tagline = "Photos in, comic panels out";

    let inner_width = title.len().max(tagline.len()) + 6;

    let top = format!("  ╭{:─<width$}╮", "", width = inner_width);
    let mid1 = format!("  │{:^width$}│", title, width = inner_width);
    let mid2 = format!("  │{:^width$}│", tagline, width = inner_width);
    let bot = format!("  ╰{:─<width$}╯", "", width = inner_width);

    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    for line in [top, mid1, mid2, bot] {
        eprintln!("{}", magenta.apply_to(line));
    }
    eprintln!();
}
