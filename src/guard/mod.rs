//! Route access guard.
//!
//! Every navigation is classified as public, private, API-auth or other API
//! and either passed through or redirected. Authenticated means "has a
//! non-empty `accessToken` cookie"; the token itself is never validated here,
//! the backend API does that.

mod decision;
mod exclusions;
mod middleware;
mod paths;

pub use decision::{
    CALLBACK_PARAM, GuardDecision, callback_url, decide, login_location, sanitize_callback,
};
pub use exclusions::AssetExclusions;
pub use middleware::{GuardState, route_guard};
pub use paths::{DASHBOARD_PATH, LOGIN_PATH, PathClass, PathRules, PublicRule};
