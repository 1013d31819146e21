//! Upstream domain allow-list

/// Fixed set of hostname patterns the proxy may forward requests to.
///
/// Membership is substring containment, not suffix matching: a hostname is
/// allowed when any pattern occurs anywhere inside it.
#[derive(Debug, Clone)]
pub struct AllowedDomainSet {
    patterns: Vec<String>,
}

impl AllowedDomainSet {
    /// Create an allow-list from a list of hostname patterns
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// The default upstream hosts of the built-in catalog
    pub fn default_domains() -> Vec<String> {
        [
            "live-hls-web-aje.getaj.net",
            "static.france24.com",
            "f24hls-i.akamaihd.net",
            "news.cgtn.com",
            "live.cgtn.com",
            "cph-p2p-msl.akamaized.net",
            "bitdash-a.akamaihd.net",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Check whether a hostname matches the allow-list
    pub fn is_allowed(&self, hostname: &str) -> bool {
        self.patterns.iter().any(|p| hostname.contains(p))
    }

    /// Number of configured patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for AllowedDomainSet {
    fn default() -> Self {
        Self::new(Self::default_domains())
    }
}
