//! XSRF token handling for widget submissions
//!
//! A random token is issued in a cookie and echoed in the sidebar form.
//! Requests that carry widget values must send the token back as a query
//! parameter matching the cookie.

use axum::http::{header, HeaderMap};
use rand::RngCore;

use crate::services::page_service::XSRF_FIELD;

const TOKEN_BYTES: usize = 16;

/// Token state for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsrfSession {
    pub token: String,
    /// The token was minted for this request and must be set as a cookie
    pub is_new: bool,
}

/// Generate a fresh random hex token
pub fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && hex::decode(token).is_ok()
}

/// Read the XSRF token from the request's cookies
pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == XSRF_FIELD)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| is_well_formed(value))
}

/// Compare two tokens without short-circuiting on the first differing byte
pub fn tokens_match(expected: &str, submitted: &str) -> bool {
    if expected.len() != submitted.len() {
        return false;
    }
    expected
        .bytes()
        .zip(submitted.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// `Set-Cookie` value carrying `token`
pub fn set_cookie_value(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Strict", XSRF_FIELD, token)
}

/// Check a request and return the token to embed in the page.
///
/// Plain page loads always pass and get the existing or a new token.
/// Widget submissions pass only when the submitted token matches the cookie.
pub fn check(
    headers: &HeaderMap,
    submitted: Option<&str>,
    has_widget_values: bool,
) -> Result<XsrfSession, &'static str> {
    let cookie = cookie_token(headers);

    if has_widget_values {
        return match (cookie, submitted) {
            (Some(cookie), Some(submitted)) if tokens_match(&cookie, submitted) => Ok(XsrfSession {
                token: cookie,
                is_new: false,
            }),
            (None, _) => Err("missing XSRF cookie"),
            _ => Err("XSRF token mismatch"),
        };
    }

    Ok(match cookie {
        Some(token) => XsrfSession { token, is_new: false },
        None => XsrfSession {
            token: new_token(),
            is_new: true,
        },
    })
}
