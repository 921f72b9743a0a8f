//! Session bootstrap for the authenticated landing view.
//!
//! The session lives in a small key/value store (`accessToken`,
//! `refreshToken`, `user`). In the browser that store is the cookie jar;
//! [`RequestCookieStore`] reads it from a request and turns writes into
//! `Set-Cookie` headers.

use std::collections::{BTreeMap, HashMap};

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_COOKIE, clear_cookie, get_cookie, set_cookie,
};
use crate::backend::LoginResponse;

/// Cached profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(alias = "hoTen")]
    pub name: String,
    #[serde(alias = "vaiTro")]
    pub role: String,
}

impl From<&LoginResponse> for UserProfile {
    fn from(login: &LoginResponse) -> Self {
        Self {
            id: login.user_id,
            email: login.email.clone(),
            name: login.name.clone(),
            role: login.role.clone(),
        }
    }
}

impl UserProfile {
    /// Up to two initials for the avatar, e.g. "Nguyen Van An" -> "NA".
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());
        match (first, last) {
            (Some(f), Some(l)) => format!("{}{}", f, l).to_uppercase(),
            (Some(f), None) => f.to_uppercase().to_string(),
            _ => self
                .email
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string()),
        }
    }
}

/// Key/value persistence for the client session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Plain in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Session store backed by the cookies of one request.
///
/// Values are percent-encoded on the wire. Writes are collected per cookie
/// name (last write wins) and emitted with [`Self::into_set_cookies`].
#[derive(Debug)]
pub struct RequestCookieStore {
    values: HashMap<String, String>,
    changes: BTreeMap<String, String>,
    max_age: Option<u64>,
    secure: bool,
}

impl RequestCookieStore {
    /// A store with no existing values, for responses that only write.
    pub fn empty(secure: bool) -> Self {
        Self {
            values: HashMap::new(),
            changes: BTreeMap::new(),
            max_age: None,
            secure,
        }
    }

    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        let mut store = Self::empty(secure);
        for key in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_COOKIE] {
            if let Some(raw) = get_cookie(headers, key) {
                // Undecodable values are kept raw and fail later as malformed
                let value = urlencoding::decode(raw)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| raw.to_string());
                store.values.insert(key.to_string(), value);
            }
        }
        store
    }

    /// Lifetime applied to cookies written from now on.
    pub fn with_max_age(mut self, max_age: Option<u64>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn into_set_cookies(self) -> Vec<String> {
        self.changes.into_values().collect()
    }
}

impl SessionStore for RequestCookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        let cookie = set_cookie(key, &urlencoding::encode(&value), self.max_age, self.secure);
        self.changes.insert(key.to_string(), cookie);
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.changes
            .insert(key.to_string(), clear_cookie(key, self.secure));
        self.values.remove(key);
    }
}

/// Result of loading the session on the landing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active { token: String, user: UserProfile },
    /// No usable session. The store has been cleared; route to login.
    LoggedOut,
}

/// Load the cached session.
///
/// A missing token or profile, or a profile that does not parse, all mean
/// "not signed in": the token and profile are removed so the guard stops
/// treating the browser as authenticated. Safe to call repeatedly.
pub fn bootstrap<S: SessionStore>(store: &mut S) -> SessionState {
    let token = store.get(ACCESS_TOKEN_COOKIE).filter(|t| !t.is_empty());
    let cached = store.get(USER_COOKIE).filter(|u| !u.is_empty());

    let (Some(token), Some(cached)) = (token, cached) else {
        clear_cached_session(store);
        return SessionState::LoggedOut;
    };

    match serde_json::from_str::<UserProfile>(&cached) {
        Ok(user) => SessionState::Active { token, user },
        Err(e) => {
            warn!(error = %e, "Cached user profile is malformed, clearing session");
            clear_cached_session(store);
            SessionState::LoggedOut
        }
    }
}

/// Persist a successful login.
pub fn store_login<S: SessionStore>(store: &mut S, login: &LoginResponse) {
    store.set(ACCESS_TOKEN_COOKIE, login.access_token.clone());
    let profile = UserProfile::from(login);
    // Serializing a struct of strings and integers cannot fail
    if let Ok(json) = serde_json::to_string(&profile) {
        store.set(USER_COOKIE, json);
    }
}

/// Remove every session entry.
pub fn logout<S: SessionStore>(store: &mut S) {
    store.remove(ACCESS_TOKEN_COOKIE);
    store.remove(REFRESH_TOKEN_COOKIE);
    store.remove(USER_COOKIE);
}

fn clear_cached_session<S: SessionStore>(store: &mut S) {
    store.remove(ACCESS_TOKEN_COOKIE);
    store.remove(USER_COOKIE);
}
