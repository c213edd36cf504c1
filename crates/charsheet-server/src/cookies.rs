//! Minimal cookie plumbing over raw `Cookie`/`Set-Cookie` headers.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderMap;

/// Seconds before the login cookies expire.
pub const COOKIE_MAX_AGE: u32 = 360;

/// Read a cookie value from the request headers.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then(|| v.to_string())
    })
}

/// `Set-Cookie` header value for a session cookie.
pub fn set_cookie(name: &str, value: &str) -> (axum::http::HeaderName, String) {
    (
        SET_COOKIE,
        format!("{name}={value}; Path=/; Max-Age={COOKIE_MAX_AGE}; HttpOnly"),
    )
}

/// `Set-Cookie` header value that removes a cookie.
pub fn clear_cookie(name: &str) -> (axum::http::HeaderName, String) {
    (SET_COOKIE, format!("{name}=; Path=/; Max-Age=0; HttpOnly"))
}
