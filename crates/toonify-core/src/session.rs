//! Async driver around a [`Studio`].
//!
//! A session owns the studio state, the transformer, and the rotating status
//! message shown while a request is in flight. At most one transformation
//! runs per session at a time.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinHandle;

use crate::catalog::LOADING_MESSAGES;
use crate::config::{Config, LimitsConfig};
use crate::error::{InputError, Result, ToonifyError};
use crate::source::SourceImage;
use crate::studio::Studio;
use crate::transform::{ImageTransformer, TransformerFactory};
use crate::types::TransformationResult;

/// One user's studio plus the machinery to run transformations for it.
pub struct Session {
    studio: Mutex<Studio>,
    transformer: Arc<dyn ImageTransformer>,
    gate: Semaphore,
    limits: LimitsConfig,
    status_interval: Duration,
    status: watch::Sender<&'static str>,
}

impl Session {
    pub fn new(config: &Config, transformer: Arc<dyn ImageTransformer>) -> Self {
        let (status, _) = watch::channel(LOADING_MESSAGES[0]);
        Self {
            studio: Mutex::new(Studio::new(config.default_style(), config.limits.clone())),
            transformer,
            gate: Semaphore::new(1),
            limits: config.limits.clone(),
            status_interval: config.status_interval(),
            status,
        }
    }

    /// Build a session backed by Gemini, with optional CLI overrides.
    pub fn from_config(
        config: &Config,
        api_key_override: Option<&str>,
        model_override: Option<&str>,
    ) -> Self {
        let transformer =
            TransformerFactory::create(&config.gemini, api_key_override, model_override);
        Self::new(config, Arc::new(transformer))
    }

    fn lock(&self) -> MutexGuard<'_, Studio> {
        // Studio transitions never leave it half-updated, so a poisoned lock is still usable.
        self.studio.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` with exclusive access to the studio.
    pub fn with_studio<R>(&self, f: impl FnOnce(&mut Studio) -> R) -> R {
        f(&mut self.lock())
    }

    /// A copy of the current studio state.
    pub fn snapshot(&self) -> Studio {
        self.lock().clone()
    }

    /// Receiver for the rotating status message.
    pub fn subscribe_status(&self) -> watch::Receiver<&'static str> {
        self.status.subscribe()
    }

    pub fn transformer_name(&self) -> &str {
        self.transformer.name()
    }

    /// Read a photo from disk and make it the current source.
    ///
    /// Failures are recorded on the studio as well as returned.
    pub async fn load_file(&self, path: &Path) -> std::result::Result<(), InputError> {
        match SourceImage::load(path, &self.limits).await {
            Ok(source) => self.with_studio(|s| s.select_file(source)),
            Err(e) => {
                self.with_studio(|s| s.reject(e.clone()));
                Err(e)
            }
        }
    }

    /// Run one transformation with the current selections.
    ///
    /// Returns [`InputError::Busy`] if another call is still in flight.
    pub async fn generate(&self) -> Result<TransformationResult> {
        let _permit = self.gate.try_acquire().map_err(|_| InputError::Busy)?;
        let job = self.with_studio(|s| s.begin())?;
        tracing::info!(
            "Transforming {} with {} ({})",
            job.source.file_name(),
            self.transformer.name(),
            job.style
        );

        let outcome = {
            let _ticker = StatusTicker::start(self.status.clone(), self.status_interval);
            self.transformer.transform(&job.request()).await
        };

        Ok(self.with_studio(|s| s.complete(job, outcome))?)
    }

    pub fn reset(&self) {
        self.with_studio(Studio::reset);
    }

    /// Write the current result as a PNG file.
    pub async fn save_result(&self, path: &Path) -> Result<PathBuf> {
        let result = self
            .with_studio(|s| s.result().cloned())
            .ok_or(InputError::NoResult)?;
        save_png(&result, path).await
    }
}

/// Decode a result's image and write it to `path`.
pub async fn save_png(result: &TransformationResult, path: &Path) -> Result<PathBuf> {
    let bytes = result.png_bytes().map_err(|e| {
        ToonifyError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}

/// Rotates the status message while alive. Dropping it stops the rotation.
pub struct StatusTicker {
    handle: JoinHandle<()>,
}

impl StatusTicker {
    /// Reset the status to the first message, then publish a random one every `period`.
    pub fn start(status: watch::Sender<&'static str>, period: Duration) -> Self {
        status.send_replace(LOADING_MESSAGES[0]);
        let handle = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Some(msg) = LOADING_MESSAGES.choose(&mut rng) {
                    status.send_replace(msg);
                }
            }
        });
        Self { handle }
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::studio::Phase;
    use crate::transform::TransformRequest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    /// Answers every request with a fixed outcome after an optional delay.
    struct StubTransformer {
        outcome: std::result::Result<String, TransformError>,
        delay: Duration,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubTransformer {
        fn new(outcome: std::result::Result<String, TransformError>) -> Arc<Self> {
            Self::slow(outcome, Duration::ZERO)
        }

        fn slow(
            outcome: std::result::Result<String, TransformError>,
            delay: Duration,
        ) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                delay,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageTransformer for StubTransformer {
        fn name(&self) -> &str {
            "stub"
        }

        async fn transform(
            &self,
            request: &TransformRequest,
        ) -> std::result::Result<String, TransformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    fn write_photo(dir: &tempfile::TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        let mut bytes = PNG.to_vec();
        bytes.resize(len.max(PNG.len()), 0);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn session(stub: Arc<StubTransformer>) -> Session {
        Session::new(&Config::default(), stub)
    }

    #[tokio::test]
    async fn test_generate_success() {
        let stub = StubTransformer::new(Ok("data:image/png;base64,QUJD".to_string()));
        let session = session(stub.clone());
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();
        session.with_studio(|s| s.toggle_artist("Jock"));

        let result = session.generate().await.unwrap();
        assert_eq!(result.transformed_url, "data:image/png;base64,QUJD");
        assert_eq!(result.influences, vec!["Jock"]);
        assert_eq!(stub.calls(), 1);

        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("MASTERFUL BLEND of the iconic art styles of: Jock."));
        assert!(matches!(session.snapshot().phase(), Phase::Succeeded { .. }));
    }

    #[tokio::test]
    async fn test_generate_surfaces_model_text() {
        let stub = StubTransformer::new(Err(TransformError::no_image(Some("blocked"))));
        let session = session(stub);
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();

        let err = session.generate().await.unwrap_err();
        assert_eq!(err.to_string(), "blocked");
        let studio = session.snapshot();
        assert_eq!(studio.error(), Some("blocked"));
        assert!(studio.result().is_none());
    }

    #[tokio::test]
    async fn test_generate_without_file_makes_no_request() {
        let stub = StubTransformer::new(Ok("data:image/png;base64,QUJD".to_string()));
        let session = session(stub.clone());

        let err = session.generate().await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a photo first.");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_file_never_reaches_transformer() {
        let stub = StubTransformer::new(Ok("data:image/png;base64,QUJD".to_string()));
        let session = session(stub.clone());
        let dir = tempfile::tempdir().unwrap();
        let big = write_photo(&dir, "big.png", 5 * 1024 * 1024 + 1);

        let err = session.load_file(&big).await.unwrap_err();
        assert!(matches!(err, InputError::FileTooLarge { .. }));
        assert_eq!(
            session.snapshot().error(),
            Some("File size too large. Please select an image under 5MB.")
        );
        assert!(session.generate().await.is_err());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let stub = StubTransformer::new(Err(TransformError::MissingApiKey));
        let session = session(stub);
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();

        let err = session.generate().await.unwrap_err();
        assert!(matches!(
            err,
            ToonifyError::Transform(TransformError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_second_generate_while_in_flight_is_busy() {
        let stub = StubTransformer::slow(
            Ok("data:image/png;base64,QUJD".to_string()),
            Duration::from_millis(100),
        );
        let session = Arc::new(session(stub.clone()));
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.generate().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let err = session.generate().await.unwrap_err();
        assert!(matches!(err, ToonifyError::Input(InputError::Busy)));
        assert!(first.await.unwrap().is_ok());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_reset_during_flight_still_applies_outcome() {
        let stub = StubTransformer::slow(
            Ok("data:image/png;base64,QUJD".to_string()),
            Duration::from_millis(50),
        );
        let session = Arc::new(session(stub));
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();

        let run = tokio::spawn({
            let session = session.clone();
            async move { session.generate().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.reset();

        assert!(run.await.unwrap().is_ok());
        assert!(session.snapshot().result().is_some());
    }

    #[tokio::test]
    async fn test_save_result_writes_png() {
        let stub = StubTransformer::new(Ok("data:image/png;base64,AQID".to_string()));
        let session = session(stub);
        let dir = tempfile::tempdir().unwrap();
        session.load_file(&write_photo(&dir, "me.png", 64)).await.unwrap();
        session.generate().await.unwrap();

        let out = dir.path().join("out").join("toonify-blend.png");
        session.save_result(&out).await.unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_without_result_fails() {
        let session = session(StubTransformer::new(Err(TransformError::MissingApiKey)));
        let dir = tempfile::tempdir().unwrap();
        let err = session.save_result(&dir.path().join("x.png")).await.unwrap_err();
        assert!(matches!(err, ToonifyError::Input(InputError::NoResult)));
    }

    #[tokio::test]
    async fn test_status_stops_rotating_after_generate() {
        let mut config = Config::default();
        config.studio.status_interval_ms = 10;
        let dir = tempfile::tempdir().unwrap();
        let photo = write_photo(&dir, "me.png", 64);

        for outcome in [
            Ok("data:image/png;base64,QUJD".to_string()),
            Err(TransformError::no_image(None)),
        ] {
            let stub = StubTransformer::slow(outcome, Duration::from_millis(50));
            let session = Session::new(&config, stub);
            session.load_file(&photo).await.unwrap();
            let mut rx = session.subscribe_status();

            let _ = session.generate().await;
            let last = *rx.borrow_and_update();
            assert!(LOADING_MESSAGES.contains(&last));

            tokio::time::sleep(Duration::from_millis(60)).await;
            assert!(!rx.has_changed().unwrap());
            assert_eq!(*rx.borrow(), last);
        }
    }

    #[tokio::test]
    async fn test_ticker_rotates_and_stops_on_drop() {
        let (tx, mut rx) = watch::channel("");
        let ticker = StatusTicker::start(tx, Duration::from_millis(10));
        assert_eq!(*rx.borrow_and_update(), LOADING_MESSAGES[0]);

        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert!(LOADING_MESSAGES.contains(&*rx.borrow()));

        drop(ticker);
        // The aborted task drops the only sender, closing the channel.
        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
