//! Studio state machine.
//!
//! ```text
//!            select_file            begin              complete(Ok)
//!   Idle ───────────────▶ Selected ───────▶ Processing ─────────────▶ Succeeded
//!    ▲                        ▲                 │
//!    │ reset (from any)       │ select_file     │ complete(Err)
//!    └────────────────────────┴──────────── Failed ◀┘
//! ```
//!
//! `Processing` owns its source image, so a transformation without a photo
//! cannot be represented. Local input errors (an oversized pick, generating
//! with no photo) are kept beside the phase and never move it. Transitions
//! are synchronous and never touch the network; the async driver lives in
//! [`crate::session`].

use crate::catalog::{self, Artist, ArtStyle, StyleOption};
use crate::config::LimitsConfig;
use crate::error::{InputError, TransformError};
use crate::prompt;
use crate::selection::{ArtistSelection, ToggleOutcome};
use crate::source::{self, SourceImage};
use crate::transform::TransformRequest;
use crate::types::TransformationResult;

/// Where the studio is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Selected {
        source: SourceImage,
    },
    Processing {
        source: SourceImage,
    },
    Succeeded {
        source: SourceImage,
        result: TransformationResult,
    },
    Failed {
        source: SourceImage,
        error: String,
    },
}

impl Phase {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selected { .. } => "selected",
            Phase::Processing { .. } => "processing",
            Phase::Succeeded { .. } => "succeeded",
            Phase::Failed { .. } => "failed",
        }
    }

    fn source(&self) -> Option<&SourceImage> {
        match self {
            Phase::Idle => None,
            Phase::Selected { source }
            | Phase::Processing { source }
            | Phase::Succeeded { source, .. }
            | Phase::Failed { source, .. } => Some(source),
        }
    }
}

/// Everything needed to run one transformation, captured when it starts.
#[derive(Debug, Clone)]
pub struct TransformJob {
    pub source: SourceImage,
    pub prompt: String,
    pub style: ArtStyle,
    pub influences: Vec<String>,
}

impl TransformJob {
    /// The request handed to an [`ImageTransformer`](crate::transform::ImageTransformer).
    pub fn request(&self) -> TransformRequest {
        TransformRequest {
            image: self.source.data_url(),
            prompt: self.prompt.clone(),
            mime_type: self.source.mime_type().to_string(),
        }
    }
}

/// Selections plus lifecycle phase for one user session.
#[derive(Debug, Clone)]
pub struct Studio {
    style: &'static StyleOption,
    artists: ArtistSelection,
    search: String,
    phase: Phase,
    /// Last local input error; cleared by the next successful transition.
    rejection: Option<String>,
    limits: LimitsConfig,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(catalog::default_style(), LimitsConfig::default())
    }
}

impl Studio {
    pub fn new(style: &'static StyleOption, limits: LimitsConfig) -> Self {
        Self {
            style,
            artists: ArtistSelection::new(),
            search: String::new(),
            phase: Phase::Idle,
            rejection: None,
            limits,
        }
    }

    // --- Accessors ---

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn style(&self) -> &'static StyleOption {
        self.style
    }

    pub fn artists(&self) -> &ArtistSelection {
        &self.artists
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.phase.source()
    }

    /// Data URL of the chosen photo.
    pub fn preview_url(&self) -> Option<String> {
        self.source().map(SourceImage::data_url)
    }

    pub fn result(&self) -> Option<&TransformationResult> {
        match &self.phase {
            Phase::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The error to show: a local rejection first, then a failed attempt.
    pub fn error(&self) -> Option<&str> {
        if let Some(rejection) = &self.rejection {
            return Some(rejection);
        }
        match &self.phase {
            Phase::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing { .. })
    }

    /// Artists matching the current search text.
    pub fn filtered_artists(&self) -> Vec<&'static Artist> {
        catalog::search_artists(&self.search)
    }

    /// The prompt a transformation would use right now.
    pub fn prompt(&self) -> String {
        prompt::build_for_style(self.style, self.artists.names())
    }

    // --- Selection transitions (valid in every phase) ---

    pub fn set_style(&mut self, style: &'static StyleOption) {
        self.style = style;
    }

    /// Select a style by key.
    pub fn set_style_key(&mut self, key: &str) -> Result<(), InputError> {
        let style =
            catalog::style_by_key(key).ok_or_else(|| InputError::UnknownStyle(key.to_string()))?;
        self.style = style;
        Ok(())
    }

    pub fn toggle_artist(&mut self, name: &str) -> ToggleOutcome {
        let outcome = self.artists.toggle(name);
        if outcome == ToggleOutcome::LimitReached {
            tracing::debug!("Artist limit reached, ignoring {name}");
        }
        outcome
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    // --- Lifecycle transitions ---

    /// Choose a new photo, replacing any preview, result, and error.
    ///
    /// An oversized photo is rejected: the error is recorded and the
    /// previous photo and result, if any, are kept.
    pub fn select_file(&mut self, source: SourceImage) -> Result<(), InputError> {
        if self.is_processing() {
            return Err(InputError::Busy);
        }
        if let Err(e) = source::check_size(source.len(), &self.limits) {
            self.reject(e.clone());
            return Err(e);
        }
        tracing::info!("Selected {} ({})", source.file_name(), source.mime_type());
        self.rejection = None;
        self.phase = Phase::Selected { source };
        Ok(())
    }

    /// Record a local validation failure. The phase, and with it the
    /// current photo and result, is left alone.
    ///
    /// Ignored while processing, so a failed file pick cannot clobber an
    /// in-flight attempt.
    pub fn reject(&mut self, error: InputError) {
        if self.is_processing() {
            return;
        }
        tracing::warn!("{error}");
        self.rejection = Some(error.to_string());
    }

    /// Start a transformation.
    ///
    /// Clears any previous result and error. Fails locally, without a
    /// request, when no photo is chosen or one is already processing.
    pub fn begin(&mut self) -> Result<TransformJob, InputError> {
        let source = match &self.phase {
            Phase::Processing { .. } => return Err(InputError::Busy),
            Phase::Idle => {
                self.reject(InputError::NoFileSelected);
                return Err(InputError::NoFileSelected);
            }
            Phase::Selected { source }
            | Phase::Succeeded { source, .. }
            | Phase::Failed { source, .. } => source.clone(),
        };

        let job = TransformJob {
            prompt: self.prompt(),
            style: self.style.id,
            influences: self.artists.names().to_vec(),
            source: source.clone(),
        };
        tracing::debug!(
            "Starting transformation: style={}, influences={:?}",
            job.style,
            job.influences
        );
        self.rejection = None;
        self.phase = Phase::Processing { source };
        Ok(job)
    }

    /// Apply the outcome of a transformation started with [`Studio::begin`].
    ///
    /// The outcome is applied even if the studio was reset in the meantime.
    pub fn complete(
        &mut self,
        job: TransformJob,
        outcome: Result<String, TransformError>,
    ) -> Result<TransformationResult, TransformError> {
        self.rejection = None;
        match outcome {
            Ok(transformed_url) => {
                let result = TransformationResult {
                    original_url: job.source.data_url(),
                    transformed_url,
                    style: job.style,
                    influences: job.influences,
                };
                self.phase = Phase::Succeeded {
                    source: job.source,
                    result: result.clone(),
                };
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Transformation failed: {e}");
                self.phase = Phase::Failed {
                    source: job.source,
                    error: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Back to a fresh studio: no photo, preview, result, error, or artists.
    ///
    /// Style and search text are kept.
    pub fn reset(&mut self) {
        tracing::debug!("Reset from {}", self.phase.name());
        self.phase = Phase::Idle;
        self.rejection = None;
        self.artists.clear();
    }
}
