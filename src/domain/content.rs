//! Transport encoding for file content.
//!
//! The contents API only accepts base64 payloads. Responses wrap the encoded
//! text at 60 columns, so decoding ignores ASCII whitespace.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::domain::AppError;

pub fn encode_content(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn decode_content(encoded: &str) -> Result<Vec<u8>, AppError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64.decode(compact.as_bytes()).map_err(|e| AppError::ParseError {
        what: "file content".into(),
        details: format!("invalid base64: {}", e),
    })
}
