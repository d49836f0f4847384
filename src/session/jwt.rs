use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

use super::SessionError;

/// The only claim we care about.
#[derive(Deserialize)]
struct TokenClaims {
    exp: Option<u64>,
}

/// Reads the `exp` claim of a JWT without validating it.
///
/// The signature is the service's business; all we want to know is whether a
/// stored token is still worth sending. `Ok(None)` means the token carries no
/// expiry at all.
pub fn expiry(token: &str) -> Result<Option<u64>, SessionError> {
    // Header, payload and signature, separated by `.`s.
    let components: Vec<&str> = token.split('.').collect();
    if components.len() != 3 {
        return Err(SessionError::Token("not a JWT".to_string()));
    }

    // Components are base64 using the URL-safe, non-padded alphabet.
    let decoded_payload = URL_SAFE_NO_PAD
        .decode(components[1])
        .map_err(|err| SessionError::Token(err.to_string()))?;
    let claims: TokenClaims = serde_json::from_slice(&decoded_payload)
        .map_err(|err| SessionError::Token(err.to_string()))?;

    Ok(claims.exp)
}

/// Whether `token` is a JWT that expired at or before `now` (seconds since the epoch).
/// Anything we cannot read as a JWT is assumed to still be valid.
pub fn is_expired_at(token: &str, now: u64) -> bool {
    matches!(expiry(token), Ok(Some(exp)) if now >= exp)
}

pub fn is_expired(token: &str) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    is_expired_at(token, now)
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}
