//! Syntactic validation of submitted URLs.
//!
//! The submitted string is stored exactly as given; this module only decides
//! whether it is acceptable.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses `input` as an absolute `http`/`https` URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes.
///
/// # Examples
///
/// ```ignore
/// assert!(parse_http_url("https://example.com/path").is_ok());
/// assert!(parse_http_url("ftp://example.com").is_err());
/// assert!(parse_http_url("example.com").is_err());
/// ```
pub fn parse_http_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
