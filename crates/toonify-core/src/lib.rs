//! Toonify Core - photo-to-comic stylization library.
//!
//! Toonify takes a photo, a rendering style, and up to three comic artists,
//! composes a generation prompt, and asks Gemini to redraw the photo as an
//! illustration. The result comes back as a PNG data URL.
//!
//! # Architecture
//!
//! ```text
//! SourceImage → Studio (style + artists) → prompt → ImageTransformer → TransformationResult
//! ```
//!
//! [`Studio`] is a synchronous state machine; [`Session`] drives it against a
//! transformer and enforces one request at a time.
//!
//! # Usage
//!
//! ```rust,ignore
//! use toonify_core::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> toonify_core::Result<()> {
//!     let config = Config::load()?;
//!     let session = Session::from_config(&config, None, None);
//!
//!     session.load_file("./me.jpg".as_ref()).await?;
//!     session.with_studio(|s| s.toggle_artist("Jim Lee"));
//!     let result = session.generate().await?;
//!     session.save_result(&config.output_path()).await?;
//!     println!("Influences: {}", result.influence_label());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod data_url;
pub mod error;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod source;
pub mod studio;
pub mod transform;
pub mod types;

// Re-exports for convenient access
pub use catalog::{Artist, ArtStyle, StyleOption};
pub use config::Config;
pub use error::{ConfigError, InputError, Result, ToonifyError, TransformError};
pub use selection::{ArtistSelection, ToggleOutcome, MAX_ARTISTS};
pub use session::Session;
pub use source::SourceImage;
pub use studio::{Phase, Studio};
pub use transform::{GeminiTransformer, ImageTransformer, TransformRequest, TransformerFactory};
pub use types::{ResultSummary, TransformationResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_session_from_default_config() {
        let session = Session::from_config(&Config::default(), Some("key"), None);
        assert_eq!(session.transformer_name(), "gemini");
        assert_eq!(session.snapshot().style().id, ArtStyle::ClassicComic);
    }
}
