use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Runtime auth configuration shared across handlers.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret used to sign session tokens.
    pub session_secret: String,
}

/// Mint a session token: a random id plus its HMAC-SHA256 signature,
/// `"<uuid>.<hex>"`. The signature makes tokens tamper-evident before any
/// store lookup happens. Returns the full token and the bare session id.
pub fn issue_token(secret: &str) -> (String, String) {
    let id = Uuid::new_v4().to_string();
    let sig = sign(secret, id.as_bytes());
    (format!("{id}.{sig}"), id)
}

/// Verify a token's signature and return the embedded session id.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let (id, hex_sig) = token.split_once('.')?;

    let Ok(expected) = hex::decode(hex_sig) else {
        return None;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return None;
    };
    mac.update(id.as_bytes());
    mac.verify_slice(&expected).ok()?;

    Some(id.to_string())
}

fn sign(secret: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Pull the bearer token out of an Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
