//! Cookie parsing and `Set-Cookie` construction for the session store.

use axum::http::{HeaderMap, HeaderValue, header};

/// Cookie holding the session token. Presence is what the guard checks.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie holding a refresh token, when the backend issues one.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Cookie holding the cached user profile (percent-encoded JSON).
pub const USER_COOKIE: &str = "user";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    for cookie_header in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = cookie_header.to_str() else {
            continue;
        };
        for part in cookie_header.split(';') {
            let part = part.trim();
            if let Some((key, value)) = part.split_once('=') {
                if key.trim() == name {
                    return Some(value.trim());
                }
            }
        }
    }
    None
}

/// Build a `Set-Cookie` value. `max_age` of `None` makes a session cookie.
pub fn set_cookie(name: &str, value: &str, max_age: Option<u64>, secure: bool) -> String {
    let mut cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", name, value);
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that removes the cookie.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", Some(0), secure)
}

/// Append `Set-Cookie` headers, skipping values that are not valid header text.
pub fn append_set_cookies<I>(headers: &mut HeaderMap, cookies: I)
where
    I: IntoIterator<Item = String>,
{
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}
