//! Source photo loading and validation.
//!
//! The size limit is checked against file metadata before any bytes are
//! read, so an oversized file is never loaded into memory.

use std::path::Path;
use std::sync::Arc;

use crate::config::LimitsConfig;
use crate::data_url;
use crate::error::InputError;

/// A validated source photo held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl SourceImage {
    /// Build a source image from raw bytes, sniffing the MIME type.
    ///
    /// Rejects content that is not a recognized image format.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, InputError> {
        let file_name = file_name.into();
        let mime_type = sniff_mime_type(&bytes)
            .ok_or_else(|| InputError::UnsupportedFormat(file_name.clone()))?;
        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes: bytes.into(),
        })
    }

    /// Build a source image with an explicit MIME type (no sniffing).
    pub fn with_mime_type(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read and validate a photo from disk.
    pub async fn load(path: &Path, limits: &LimitsConfig) -> Result<Self, InputError> {
        let unreadable = |e: std::io::Error| InputError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(InputError::Unreadable {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        check_size(metadata.len(), limits)?;

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        // The file may have grown between the metadata call and the read.
        check_size(bytes.len() as u64, limits)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let source = Self::from_bytes(file_name, bytes)?;
        tracing::debug!(
            "Loaded {} ({}, {} bytes)",
            source.file_name,
            source.mime_type,
            source.len()
        );
        Ok(source)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Self-describing data URL of the photo, used as the preview and as the
    /// payload handed to the transformer.
    pub fn data_url(&self) -> String {
        data_url::encode(&self.mime_type, &self.bytes)
    }
}

/// Reject sizes over the configured limit.
pub fn check_size(size_bytes: u64, limits: &LimitsConfig) -> Result<(), InputError> {
    if size_bytes > limits.max_file_size_bytes() {
        return Err(InputError::FileTooLarge {
            size_bytes,
            max_mb: limits.max_file_size_mb,
        });
    }
    Ok(())
}

/// Detect the MIME type of image bytes from their magic numbers.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_HEADER: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_HEADER: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(sniff_mime_type(&PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime_type(&JPEG_HEADER), Some("image/jpeg"));
        let webp = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'];
        assert_eq!(sniff_mime_type(&webp), Some("image/webp"));
    }

    #[test]
    fn test_from_bytes_rejects_non_images() {
        let err = SourceImage::from_bytes("notes.txt", b"hello world".to_vec()).unwrap_err();
        assert_eq!(err, InputError::UnsupportedFormat("notes.txt".to_string()));
    }

    #[test]
    fn test_data_url_uses_sniffed_mime() {
        let source = SourceImage::from_bytes("a.png", PNG_HEADER.to_vec()).unwrap();
        assert!(source.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(source.len(), 12);
    }

    #[test]
    fn test_check_size_boundary() {
        let limits = LimitsConfig::default();
        assert!(check_size(5 * 1024 * 1024, &limits).is_ok());
        assert_eq!(
            check_size(5 * 1024 * 1024 + 1, &limits),
            Err(InputError::FileTooLarge {
                size_bytes: 5 * 1024 * 1024 + 1,
                max_mb: 5
            })
        );
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&JPEG_HEADER).unwrap();

        let source = SourceImage::load(file.path(), &LimitsConfig::default())
            .await
            .unwrap();
        assert_eq!(source.mime_type(), "image/jpeg");
        assert!(source.file_name().ends_with(".jpg"));
        assert_eq!(source.bytes(), &JPEG_HEADER);
    }

    #[tokio::test]
    async fn test_load_rejects_oversized_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&PNG_HEADER).unwrap();
        file.write_all(&vec![0u8; 1024 * 1024 + 1]).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: 1,
        };
        let err = SourceImage::load(file.path(), &limits).await.unwrap_err();
        assert!(matches!(err, InputError::FileTooLarge { max_mb: 1, .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = SourceImage::load(Path::new("/nonexistent/photo.jpg"), &LimitsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InputError::Unreadable { .. }));
    }
}
