//! Reversible key encoding for repository names and drawing ids.
//!
//! Keys travel base64url-encoded (no padding) in URL path segments, JSON
//! bodies and browser locations, so arbitrary titles and ids stay URL-safe.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;

/// Key decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Key is not valid base64url: {0}")]
    InvalidBase64(String),
    #[error("Key does not decode to UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Encode a plain key for transport.
pub fn encode_key(plain: &str) -> String {
    URL_SAFE_NO_PAD.encode(plain.as_bytes())
}

/// Decode a transported key back to its plain form.
pub fn decode_key(encoded: &str) -> Result<String, CodecError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|_| CodecError::InvalidBase64(encoded.to_string()))?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8(encoded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_url_safe() {
        let encoded = encode_key("a Ā 𐀀 文 🦄 / ? #");
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_unicode_key_survives() {
        let plain = "a Ā 𐀀 文 🦄";
        assert_eq!(decode_key(&encode_key(plain)).unwrap(), plain);
    }

    #[test]
    fn test_known_encoding() {
        // Standard alphabet would give "YSDEgCDwkICAIOaWhyDwn6aE"; same here, no '+' or '/'.
        assert_eq!(encode_key("a Ā 𐀀 文 🦄"), "YSDEgCDwkICAIOaWhyDwn6aE");
        assert_eq!(encode_key("ab"), "YWI");
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(matches!(decode_key("not base64!"), Err(CodecError::InvalidBase64(_))));
    }

    #[test]
    fn test_rejects_non_utf8() {
        // 0xff 0xfe is not valid UTF-8
        let encoded = URL_SAFE_NO_PAD.encode([0xff, 0xfe]);
        assert!(matches!(decode_key(&encoded), Err(CodecError::InvalidUtf8(_))));
    }
}
