//! Request origin verification.
//!
//! SmartThings signs webhook calls with a Joyent-style HTTP signature
//! carried in the `Authorization` header:
//!
//! ```text
//! Authorization: Signature keyId="/SmartThings/...",signature="...",
//!     headers="(request-target) digest date",algorithm="rsa-sha256"
//! ```
//!
//! PING and CONFIRMATION arrive before the app's public key is known, so
//! the dispatcher exempts them from verification entirely.

use axum::http::HeaderMap;
use tracing::debug;

/// Parsed fields of a `Signature` authorization header.
#[derive(Debug)]
struct SignatureHeader {
    key_id: String,
    algorithm: Option<String>,
}

/// Verify that a request carries a well-formed platform signature.
///
/// The cryptographic check is not implemented yet: any structurally valid
/// signature is accepted. A missing or malformed header still fails, so
/// unsigned callers are rejected.
// TODO: fetch the platform public key for `key_id` and verify the
// rsa-sha256 signature over the signed headers.
pub fn verify(headers: &HeaderMap) -> bool {
    let Some(sig) = parse_authorization(headers) else {
        return false;
    };

    debug!(
        key_id = %sig.key_id,
        algorithm = sig.algorithm.as_deref().unwrap_or("-"),
        "accepting well-formed signature without key verification"
    );
    true
}

/// Parse the `Authorization` header if it uses the `Signature` scheme and
/// carries non-empty `keyId` and `signature` parameters.
fn parse_authorization(headers: &HeaderMap) -> Option<SignatureHeader> {
    let value = headers.get("authorization")?.to_str().ok()?;

    let rest = value.strip_prefix("Signature ")?;

    let mut key_id = None;
    let mut algorithm = None;
    let mut signature = None;

    for param in split_params(rest) {
        let (name, raw) = param.split_once('=')?;
        let val = raw.trim().trim_matches('"');
        match name.trim() {
            "keyId" => key_id = Some(val.to_string()),
            "algorithm" => algorithm = Some(val.to_string()),
            "signature" => signature = Some(val.to_string()),
            _ => {}
        }
    }

    let key_id = key_id.filter(|k: &String| !k.is_empty())?;
    signature.filter(|s: &String| !s.is_empty())?;

    Some(SignatureHeader { key_id, algorithm })
}

/// Split `k="v",k2="v2"` parameters on commas outside of quotes. Signature
/// values are base64 and never contain commas, but quoted `headers` lists
/// contain spaces, so a plain `split(',')` suffices only outside quotes.
fn split_params(input: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn well_formed_signature_passes() {
        let headers = headers_with_auth(
            "Signature keyId=\"/SmartThings/dev\",signature=\"dGVzdA==\",\
             headers=\"(request-target) digest date\",algorithm=\"rsa-sha256\"",
        );
        assert!(verify(&headers));
    }

    #[test]
    fn missing_header_fails() {
        assert!(!verify(&HeaderMap::new()));
    }

    #[test]
    fn bearer_scheme_fails() {
        let headers = headers_with_auth("Bearer sometoken");
        assert!(!verify(&headers));
    }

    #[test]
    fn missing_key_id_fails() {
        let headers = headers_with_auth("Signature signature=\"dGVzdA==\"");
        assert!(!verify(&headers));
    }

    #[test]
    fn missing_signature_param_fails() {
        let headers = headers_with_auth("Signature keyId=\"/SmartThings/dev\"");
        assert!(!verify(&headers));
    }
}
