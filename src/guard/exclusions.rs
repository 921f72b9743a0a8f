//! Paths the guard never looks at.

/// Static asset paths that bypass the guard entirely.
///
/// An entry ending in `/` covers everything below that directory. Any other
/// entry names a single file and must equal the request path.
#[derive(Debug, Clone)]
pub struct AssetExclusions {
    entries: Vec<String>,
}

impl Default for AssetExclusions {
    fn default() -> Self {
        Self::new([
            "/static/",
            "/favicon.ico",
            "/logo.svg",
            "/opengraph-image.png",
            "/twitter-image.png",
        ])
    }
}

impl AssetExclusions {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| {
            if entry.ends_with('/') {
                path.starts_with(entry.as_str())
            } else {
                path == entry
            }
        })
    }
}
