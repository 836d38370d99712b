//! Reachability checks for submitted URLs.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Decides whether a submitted URL points at something that answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlChecker: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Probes URLs over HTTP.
///
/// Sends a `HEAD` request and falls back to `GET` when the server rejects
/// `HEAD` with 405. Any status below 400 (after redirects) counts as reachable.
pub struct HttpUrlChecker {
    client: reqwest::Client,
}

impl HttpUrlChecker {
    /// Builds a checker whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("short-url/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UrlChecker for HttpUrlChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        let status = match self.client.head(url).send().await {
            Ok(resp) if resp.status() == reqwest::StatusCode::METHOD_NOT_ALLOWED => {
                match self.client.get(url).send().await {
                    Ok(resp) => resp.status(),
                    Err(e) => {
                        debug!(url, error = %e, "GET probe failed");
                        return false;
                    }
                }
            }
            Ok(resp) => resp.status(),
            Err(e) => {
                debug!(url, error = %e, "HEAD probe failed");
                return false;
            }
        };

        debug!(url, %status, "URL probe finished");
        status.as_u16() < 400
    }
}

/// Accepts every URL without any network traffic.
///
/// Used when `VALIDATE_ORIGINAL_URL` is off.
pub struct NoopUrlChecker;

#[async_trait]
impl UrlChecker for NoopUrlChecker {
    async fn is_reachable(&self, _url: &str) -> bool {
        true
    }
}
