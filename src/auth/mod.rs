//! Cookie-backed session token store.
//!
//! The browser holds the session in three cookies: `accessToken` (read by the
//! route guard), `refreshToken` and `user` (cached profile). This module only
//! reads and writes them; it never validates the token.

mod cookie;
mod ip;

pub use cookie::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_COOKIE, append_set_cookies, clear_cookie,
    get_cookie, set_cookie,
};
pub use ip::extract_client_ip;
