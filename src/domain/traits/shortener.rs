use async_trait::async_trait;
use crate::application::errors::{WebError, WebResult};

/// Shortener trait - one third-party URL shortening provider
#[async_trait]
pub trait Shortener: Send + Sync {
    /// Registry name of the provider, e.g. "is.gd"
    fn name(&self) -> &str;

    /// Shorten `url`, optionally asking for a `custom` code and passing an API `key`
    async fn shorten(&self, url: &str, custom: Option<&str>, key: Option<&str>) -> WebResult<String>;

    /// Like `shorten`, but a service-level failure yields the original url.
    ///
    /// Unknown services and transport errors still propagate.
    async fn try_shorten(&self, url: &str, custom: Option<&str>, key: Option<&str>) -> WebResult<String> {
        match self.shorten(url, custom, key).await {
            Err(WebError::Service(e)) => {
                tracing::debug!("{} failed to shorten {}: {}", self.name(), url, e);
                Ok(url.to_string())
            }
            other => other,
        }
    }

    /// Resolve a short url back to the long url it points at
    async fn expand(&self, url: &str) -> WebResult<String>;
}
