//! Path classification for the route guard.

/// Login page, also the redirect target for unauthenticated requests.
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing page for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The class a request path falls into. Every path maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Reachable without authentication (login, registration, password recovery).
    Public,
    /// Authentication API; never redirected.
    ApiAuth,
    /// Any other API path. The backend enforces its own authorization.
    ApiOther,
    /// Everything else.
    Private,
}

/// A single public-path rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicRule {
    Exact(String),
    Prefix(String),
}

impl PublicRule {
    fn matches(&self, path: &str) -> bool {
        match self {
            PublicRule::Exact(p) => path == p,
            PublicRule::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// The rule set used to classify paths.
#[derive(Debug, Clone)]
pub struct PathRules {
    pub public: Vec<PublicRule>,
    pub api_prefix: String,
    pub api_auth_prefix: String,
    pub login_path: String,
    pub dashboard_path: String,
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            public: vec![
                PublicRule::Exact(LOGIN_PATH.to_string()),
                PublicRule::Exact("/auth/register".to_string()),
                PublicRule::Exact("/auth/forgot-password".to_string()),
                // Reset links carry a token segment: /auth/reset-password/{token}
                PublicRule::Prefix("/auth/reset-password/".to_string()),
            ],
            api_prefix: "/api/".to_string(),
            api_auth_prefix: "/api/auth".to_string(),
            login_path: LOGIN_PATH.to_string(),
            dashboard_path: DASHBOARD_PATH.to_string(),
        }
    }
}

impl PathRules {
    /// Classify a request path.
    ///
    /// Checks run in a fixed order: API-Auth, API-Other, Public, then Private
    /// as the fallback. New classes go in as new arms without touching the
    /// existing ones.
    pub fn classify(&self, path: &str) -> PathClass {
        if path.starts_with(self.api_auth_prefix.as_str()) {
            PathClass::ApiAuth
        } else if path.starts_with(self.api_prefix.as_str()) {
            PathClass::ApiOther
        } else if self.is_public(path) {
            PathClass::Public
        } else {
            PathClass::Private
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|rule| rule.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_public_paths() {
        let rules = PathRules::default();
        for path in ["/auth/login", "/auth/register", "/auth/forgot-password"] {
            assert_eq!(rules.classify(path), PathClass::Public, "{}", path);
        }
    }

    #[test]
    fn test_exact_rules_do_not_prefix_match() {
        let rules = PathRules::default();
        assert_eq!(rules.classify("/auth/login/extra"), PathClass::Private);
        assert_eq!(rules.classify("/auth/registered"), PathClass::Private);
        assert_eq!(rules.classify("/auth/login/"), PathClass::Private);
    }

    #[test]
    fn test_reset_password_prefix_is_public() {
        let rules = PathRules::default();
        assert_eq!(
            rules.classify("/auth/reset-password/abc123"),
            PathClass::Public
        );
        assert_eq!(
            rules.classify("/auth/reset-password/eyJhbGciOi.x.y"),
            PathClass::Public
        );
        // The bare segment without a token is not covered by the prefix
        assert_eq!(rules.classify("/auth/reset-password"), PathClass::Private);
    }

    #[test]
    fn test_api_auth_paths() {
        let rules = PathRules::default();
        assert_eq!(rules.classify("/api/auth/login"), PathClass::ApiAuth);
        assert_eq!(rules.classify("/api/auth/logout"), PathClass::ApiAuth);
        assert_eq!(rules.classify("/api/auth"), PathClass::ApiAuth);
    }

    #[test]
    fn test_api_other_paths() {
        let rules = PathRules::default();
        assert_eq!(rules.classify("/api/students"), PathClass::ApiOther);
        assert_eq!(rules.classify("/api/v1/lop-hoc/3"), PathClass::ApiOther);
        assert_eq!(rules.classify("/api/"), PathClass::ApiOther);
    }

    #[test]
    fn test_private_is_default() {
        let rules = PathRules::default();
        for path in ["/", "/dashboard", "/dashboard/hoc-sinh", "/api", "/apix", ""] {
            assert_eq!(rules.classify(path), PathClass::Private, "{:?}", path);
        }
    }

    #[test]
    fn test_custom_rules() {
        let mut rules = PathRules::default();
        rules.public.push(PublicRule::Prefix("/docs/".to_string()));
        assert_eq!(rules.classify("/docs/getting-started"), PathClass::Public);
        assert_eq!(rules.classify("/docs"), PathClass::Private);
    }
}
