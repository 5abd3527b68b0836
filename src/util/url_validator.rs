use thiserror::Error;
use url::Url;

/// Reasons a feed URL value is not a usable absolute web link.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (podcast clients expect http/https)")]
    UnsupportedScheme(String),
}

/// Validates a URL string destined for the feed (`link`, `itunes:image`,
/// `enclosure`).
///
/// Feed values are never rewritten: callers use this to report suspicious
/// input, not to reject it.
///
/// # Examples
///
/// ```
/// use podfeed::util::validate_url;
///
/// assert!(validate_url("https://example.com/ep1.m4a").is_ok());
/// assert!(validate_url("ep1.m4a").is_err());
/// assert!(validate_url("ftp://example.com/ep1.m4a").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

/// Logs a warning when a non-empty `value` is not an http(s) URL.
///
/// Returns `true` when the value is empty or valid. Empty values are
/// legitimate (every channel field may be left blank).
pub fn warn_if_invalid_url(field: &str, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match validate_url(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(field, value, error = %e, "Value is not an absolute http(s) URL, writing as-is");
            false
        }
    }
}
