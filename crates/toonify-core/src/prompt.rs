//! Generation prompt composition.
//!
//! The prompt is the style fragment, a fixed anti-photorealism constraint,
//! and, when influences are chosen, a fusion clause naming them.

use crate::catalog::StyleOption;

/// Appended to every style fragment.
const ILLUSTRATION_CONSTRAINT: &str = "CRITICAL CONSTRAINT: The output must look like a 2D illustration, drawing, or cartoon.\n\
     Do NOT produce a realistic photograph or a simple photo filter.\n\
     Ensure heavy stylization and non-photorealistic rendering.";

/// Compose the instruction text for a style fragment and ordered artist names.
///
/// Pure: the same fragment and the same ordered names always produce
/// byte-identical output.
pub fn build_prompt<S: AsRef<str>>(style_fragment: &str, artists: &[S]) -> String {
    let mut prompt = format!("{style_fragment}\n{ILLUSTRATION_CONSTRAINT}");

    if !artists.is_empty() {
        let names = artists
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!(
            " Additionally, reconstruct this image as a MASTERFUL BLEND of the iconic art styles of: {names}.\n\
             Meticulously fuse their unique visual signatures (line weight, hatching, and aesthetic flair).\n\
             The result should be a high-end comic book illustration that clearly exhibits the hand-drawn characteristics of {names}.\n\
             Keep the subject recognizable but transform them entirely into a comic character."
        ));
    }

    prompt
}

/// Compose the instruction text for a catalog style.
pub fn build_for_style<S: AsRef<str>>(style: &StyleOption, artists: &[S]) -> String {
    build_prompt(style.prompt, artists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_style, ART_STYLES};

    #[test]
    fn test_prompt_without_artists() {
        let prompt = build_prompt("Draw it as a comic.", &[] as &[&str]);
        assert!(prompt.starts_with("Draw it as a comic.\nCRITICAL CONSTRAINT:"));
        assert!(prompt.ends_with("non-photorealistic rendering."));
        assert!(!prompt.contains("MASTERFUL BLEND"));
    }

    #[test]
    fn test_prompt_names_artists_twice_in_order() {
        let prompt = build_prompt("Base.", &["Jim Lee", "Jock", "Sana Takeda"]);
        let names = "Jim Lee, Jock, Sana Takeda";
        assert_eq!(prompt.matches(names).count(), 2);
        assert!(prompt.contains(&format!("iconic art styles of: {names}.")));
        assert!(prompt.contains(&format!("hand-drawn characteristics of {names}.")));
        assert!(prompt.ends_with("transform them entirely into a comic character."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let artists = vec!["Greg Capullo".to_string(), "Jae Lee".to_string()];
        for style in ART_STYLES {
            assert_eq!(build_for_style(style, &artists), build_for_style(style, &artists));
        }
    }

    #[test]
    fn test_artist_order_changes_prompt() {
        let a = build_prompt("Base.", &["Jim Lee", "Jock"]);
        let b = build_prompt("Base.", &["Jock", "Jim Lee"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_for_style_uses_fragment() {
        let prompt = build_for_style(default_style(), &["Jock"]);
        assert!(prompt.starts_with(default_style().prompt));
    }
}
