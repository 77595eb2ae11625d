// ABOUTME: Auth cookie helpers for browser sessions
// ABOUTME: httpOnly + SameSite=Lax; the Secure flag follows the BASE_URL scheme
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Auth cookie handling
//!
//! The login route sets the JWT in an `auth_token` cookie so browser clients
//! need no token plumbing; API clients keep using the bearer header.

use std::env;

use axum::http::{header, HeaderMap, HeaderValue};

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "auth_token";

/// Set the session cookie carrying the JWT
pub fn set_auth_cookie(headers: &mut HeaderMap, token: &str, max_age_secs: i64) {
    let mut cookie =
        format!("{AUTH_COOKIE}={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax");
    if infer_secure_flag() {
        cookie.push_str("; Secure");
    }
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
}

/// Expire the session cookie
pub fn clear_auth_cookie(headers: &mut HeaderMap) {
    let mut cookie = format!("{AUTH_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax");
    if infer_secure_flag() {
        cookie.push_str("; Secure");
    }
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
}

// Secure=true unless BASE_URL is explicitly plain http (local development).
// Unset BASE_URL fails secure.
fn infer_secure_flag() -> bool {
    env::var("BASE_URL").map_or(true, |url| url.starts_with("https://"))
}

/// Extract a cookie value from request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name.trim() == cookie_name).then(|| value.trim().to_owned())
        })
}
