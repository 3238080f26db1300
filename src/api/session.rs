//! Signed session cookies carrying the per-browser user identifier.
//!
//! Cookie value: `{user_id}.{hex hmac-sha256(secret, user_id)}`. The secret
//! comes from configuration so every instance behind a balancer agrees.

use axum::http::{header::COOKIE, HeaderMap};
use hmac::{Hmac, Mac};
use nursebot_core::{config::SessionConfig, error::NurseError};
use sha2::Sha256;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// User identifier used when a connection carries no valid session.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Issues and verifies session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Arc<str>,
    cookie_name: Arc<str>,
    max_age_secs: u64,
}

impl SessionKeys {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            secret: Arc::from(config.secret.as_str()),
            cookie_name: Arc::from(config.cookie_name.as_str()),
            max_age_secs: config.max_age_secs,
        }
    }

    /// Fresh opaque identifier: 32 lowercase hex characters.
    pub fn new_user_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key length")
    }

    /// Hex HMAC of a user identifier.
    pub fn sign(&self, user_id: &str) -> String {
        let mut mac = self.mac();
        mac.update(user_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Value stored in the cookie for `user_id`.
    pub fn cookie_value(&self, user_id: &str) -> String {
        format!("{user_id}.{}", self.sign(user_id))
    }

    /// Full `Set-Cookie` header value.
    pub fn set_cookie(&self, user_id: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name,
            self.cookie_value(user_id),
            self.max_age_secs
        )
    }

    /// Check a cookie value and return the user identifier it carries.
    pub fn verify(&self, value: &str) -> Result<String, NurseError> {
        let (user_id, sig_hex) = value
            .rsplit_once('.')
            .ok_or_else(|| NurseError::Session("malformed session cookie".to_string()))?;
        if user_id.is_empty() {
            return Err(NurseError::Session("empty user id".to_string()));
        }
        let sig = hex::decode(sig_hex)
            .map_err(|e| NurseError::Session(format!("bad signature encoding: {e}")))?;
        let mut mac = self.mac();
        mac.update(user_id.as_bytes());
        mac.verify_slice(&sig)
            .map_err(|_| NurseError::Session("signature mismatch".to_string()))?;
        Ok(user_id.to_string())
    }

    /// User identifier from a request's cookies, if present and correctly signed.
    pub fn user_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .find_map(|h| extract_cookie(h, &self.cookie_name))?;
        match self.verify(raw) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                warn!("session: rejected cookie: {e}");
                None
            }
        }
    }

    /// Like [`Self::user_from_headers`] but falls back to [`DEFAULT_USER_ID`].
    pub fn resolve_user(&self, headers: &HeaderMap) -> String {
        self.user_from_headers(headers).unwrap_or_else(|| {
            warn!("session: no valid session cookie, using {DEFAULT_USER_ID}");
            DEFAULT_USER_ID.to_string()
        })
    }
}

/// Find `name=value` in a `Cookie` header.
fn extract_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
