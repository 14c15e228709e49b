use async_trait::async_trait;
use crate::application::errors::WebResult;

/// Pastebin trait - one third-party paste provider
#[async_trait]
pub trait Pastebin: Send + Sync {
    /// Registry name of the provider, e.g. "hastebin"
    fn name(&self) -> &str;

    /// Upload `data` and return a url ending in `.{ext}`
    async fn paste(&self, data: &[u8], ext: &str) -> WebResult<String>;
}
