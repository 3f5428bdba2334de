//! Client-side JWT payload decoding.
//!
//! The signature is not checked here. The payload is only read for display
//! and local gating; the backend verifies the token on every request.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use tracing::warn;

use crate::models::auth::TokenClaims;

/// Decode the payload of a compact `header.payload.signature` token.
///
/// Returns `None` for anything that is not three segments, whose payload is
/// not base64 (URL-safe or standard alphabet, padding optional), or whose
/// payload is not a JSON object of claims.
pub fn decode_token(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        warn!(segments = segments.len(), "token is not a three-part JWT");
        return None;
    };

    let bytes = match decode_segment(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "token payload is not valid base64");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            warn!(error = %e, "token payload is not valid JSON claims");
            None
        }
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
}
