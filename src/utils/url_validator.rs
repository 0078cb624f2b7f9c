//! Validation of URLs submitted for shortening.
//!
//! The validator only decides whether a URL is acceptable. It never rewrites
//! the caller's input: the stored value is the string exactly as submitted,
//! while the scheme-completed form exists only for parsing.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

/// Matches a leading `scheme:` that is not a `host:port` pair.
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:(?:[^0-9]|$)").unwrap());

/// Reasons a URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    Malformed(String),

    #[error("URL must have a valid host")]
    MissingHost,

    #[error("Unsupported URL scheme '{0}', only http and https are allowed")]
    UnsupportedScheme(String),

    #[error("Host '{0}' is not allowed")]
    Blocked(String),
}

/// Checks candidate URLs against syntax rules and a host blocklist.
///
/// # Rules
///
/// Applied in order:
///
/// 1. Empty or whitespace-only input is rejected
/// 2. Input without a scheme is parsed as if it started with `http://`
/// 3. The result must parse as an absolute URL
/// 4. The host must be non-empty
/// 5. Only `http` and `https` are accepted
/// 6. The host must not be blocked (subdomains of a blocked host included)
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    blocked_hosts: Vec<String>,
}

impl UrlValidator {
    /// Creates a validator with an empty blocklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that rejects the given hosts and their subdomains.
    pub fn with_blocked_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocked_hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        Self { blocked_hosts }
    }

    pub fn blocked_hosts(&self) -> &[String] {
        &self.blocked_hosts
    }

    /// Validates `raw` and returns its parsed, scheme-completed form.
    ///
    /// # Errors
    ///
    /// Returns the first [`UrlValidationError`] rule that fails.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let validator = UrlValidator::new();
    /// assert!(validator.validate("example.com").is_ok());
    /// assert!(validator.validate("ftp://example.com").is_err());
    /// ```
    pub fn validate(&self, raw: &str) -> Result<Url, UrlValidationError> {
        let candidate = raw.trim();
        if candidate.is_empty() {
            return Err(UrlValidationError::Empty);
        }

        let url = Url::parse(&with_default_scheme(candidate))
            .map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
            _ => return Err(UrlValidationError::MissingHost),
        };

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
        }

        if self.is_blocked(&host) {
            return Err(UrlValidationError::Blocked(host));
        }

        Ok(url)
    }

    fn is_blocked(&self, host: &str) -> bool {
        self.blocked_hosts.iter().any(|blocked| {
            host == blocked
                || host
                    .strip_suffix(blocked.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

/// Prefixes `http://` when `raw` carries no scheme of its own.
///
/// `example.com:8080/path` counts as schemeless: a colon followed by a digit
/// is read as a port, not a scheme separator.
pub fn with_default_scheme(raw: &str) -> Cow<'_, str> {
    if SCHEME_PREFIX.is_match(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{raw}"))
    }
}
