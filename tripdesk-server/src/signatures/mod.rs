//! 签名采集与存储
//!
//! One component serves all three signing flows (duty-slip authority,
//! client close, salary approval): the pad submits an inline
//! `data:image/...;base64` payload, the server stores it
//! content-addressed and hands back a `/signatures/<file>` URL for the
//! caller to keep in whichever link column it owns.

mod store;

pub use store::SignatureStore;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use shared::{AppError, AppResult};

/// Maximum decoded signature size (2MB) — a pad drawing, not a photo
pub const MAX_SIGNATURE_SIZE: usize = 2 * 1024 * 1024;

/// Accepted inline payload prefixes and the extension each stores as
const DATA_URL_FORMATS: &[(&str, &str)] = &[
    ("data:image/png;base64,", "png"),
    ("data:image/jpeg;base64,", "jpg"),
    ("data:image/webp;base64,", "webp"),
];

/// A decoded, verified inline signature image
#[derive(Debug, Clone)]
pub struct InlinePayload {
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Link columns hold either a resolved URL or an inline payload still
/// to be stored
pub fn is_inline(link: &str) -> bool {
    link.starts_with("data:")
}

/// Decode and verify an inline payload. Everything here is a
/// data-shape rejection: nothing gets persisted on failure.
pub fn parse_data_url(data: &str) -> AppResult<InlinePayload> {
    if data.is_empty() {
        return Err(AppError::validation("signatureData must not be empty"));
    }
    let (prefix, extension) = *DATA_URL_FORMATS
        .iter()
        .find(|(prefix, _)| data.starts_with(prefix))
        .ok_or_else(|| {
            AppError::validation(
                "signatureData must be a data:image/png, jpeg or webp base64 payload",
            )
        })?;

    let bytes = STANDARD
        .decode(&data[prefix.len()..])
        .map_err(|e| AppError::validation(format!("signatureData is not valid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::validation("signatureData decoded to zero bytes"));
    }
    if bytes.len() > MAX_SIGNATURE_SIZE {
        return Err(AppError::validation(format!(
            "signature too large: {} bytes, max {MAX_SIGNATURE_SIZE}",
            bytes.len()
        )));
    }
    image::load_from_memory(&bytes)
        .map_err(|e| AppError::validation(format!("signatureData is not a decodable image: {e}")))?;

    Ok(InlinePayload {
        extension,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const TINY_PNG_B64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn accepts_a_png_data_url() {
        let payload = parse_data_url(&format!("data:image/png;base64,{TINY_PNG_B64}")).unwrap();
        assert_eq!(payload.extension, "png");
        assert!(!payload.bytes.is_empty());
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(parse_data_url("data:text/plain;base64,aGk=").is_err());
        assert!(parse_data_url("http://example.com/sig.png").is_err());
        assert!(parse_data_url("").is_err());
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        let junk = STANDARD.encode(b"not an image at all");
        assert!(parse_data_url(&format!("data:image/png;base64,{junk}")).is_err());
    }

    #[test]
    fn inline_detection() {
        assert!(is_inline("data:image/png;base64,AAAA"));
        assert!(!is_inline("/signatures/abc.png"));
        assert!(!is_inline(""));
    }
}
