//! `data:` URL helpers for inline images.

use base64::Engine;

/// Encode bytes as a base64 data URL with the given MIME type.
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    wrap(mime_type, &base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Wrap an already base64-encoded payload as a data URL.
pub fn wrap(mime_type: &str, base64_data: &str) -> String {
    format!("data:{mime_type};base64,{base64_data}")
}

/// Return the base64 payload of a data URL.
///
/// Everything up to and including the first comma is metadata. A string
/// without a comma is assumed to already be a bare payload.
pub fn payload(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    }
}

/// Return the MIME type declared by a data URL, if any.
pub fn mime_type(data: &str) -> Option<&str> {
    let header = data.strip_prefix("data:")?.split_once(',')?.0;
    let mime = header.split(';').next().unwrap_or_default();
    (!mime.is_empty()).then_some(mime)
}

/// Decode the payload of a data URL (or bare base64) into bytes.
pub fn decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::STANDARD.decode(payload(data).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_prefix() {
        let url = encode("image/jpeg", &[0xFF, 0xD8, 0xFF]);
        assert_eq!(url, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_payload_strips_metadata() {
        assert_eq!(payload("data:image/png;base64,iVBORw0KGgo="), "iVBORw0KGgo=");
        assert_eq!(payload("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("data:image/webp;base64,AAAA"), Some("image/webp"));
        assert_eq!(mime_type("AAAA"), None);
        assert_eq!(mime_type("data:;base64,AAAA"), None);
    }

    #[test]
    fn test_decode_payload() {
        let bytes = decode("data:image/png;base64,AQID").unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert!(decode("data:image/png;base64,***").is_err());
    }
}
