use std::sync::Arc;

use crate::application::errors::{ServiceFamily, WebError, WebResult};
use crate::domain::traits::Shortener;
use crate::infrastructure::config::{Config, DEFAULT_PASTEBIN, DEFAULT_SHORTENER};
use crate::infrastructure::registry::ServiceRegistry;

/// Returned by `paste` once every pastebin has failed
pub const PASTE_FAILED: &str = "Unable to paste data";

/// Shortening, expanding and pasting on top of the service registry
pub struct WebService {
    registry: Arc<ServiceRegistry>,
    default_shortener: String,
    default_pastebin: String,
}

impl WebService {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            default_shortener: DEFAULT_SHORTENER.to_string(),
            default_pastebin: DEFAULT_PASTEBIN.to_string(),
        }
    }

    pub fn from_config(registry: Arc<ServiceRegistry>, config: &Config) -> Self {
        Self::new(registry)
            .with_default_shortener(&config.shorteners.default)
            .with_default_pastebin(&config.pastebins.default)
    }

    pub fn with_default_shortener(mut self, name: impl Into<String>) -> Self {
        self.default_shortener = name.into();
        self
    }

    pub fn with_default_pastebin(mut self, name: impl Into<String>) -> Self {
        self.default_pastebin = name.into();
        self
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    fn shortener(&self, service: Option<&str>) -> WebResult<Arc<dyn Shortener>> {
        let name = service.unwrap_or(&self.default_shortener);
        self.registry
            .shortener(name)
            .ok_or_else(|| WebError::unknown(ServiceFamily::Shortener, name))
    }

    /// Shorten `url` with `service`, or the default shortener
    pub async fn shorten(&self, url: &str, custom: Option<&str>, key: Option<&str>, service: Option<&str>) -> WebResult<String> {
        self.shortener(service)?.shorten(url, custom, key).await
    }

    /// Shorten `url`, handing it back unchanged if the service reports a failure
    pub async fn try_shorten(&self, url: &str, custom: Option<&str>, key: Option<&str>, service: Option<&str>) -> WebResult<String> {
        self.shortener(service)?.try_shorten(url, custom, key).await
    }

    /// Expand a short url.
    ///
    /// Without an explicit `service` the provider is inferred from the url;
    /// unrecognised urls are expanded by following their redirect.
    pub async fn expand(&self, url: &str, service: Option<&str>) -> WebResult<String> {
        let shortener = match service {
            Some(_) => self.shortener(service)?,
            None => match self.registry.infer_shortener(url) {
                Some((name, shortener)) => {
                    tracing::debug!("Expanding {} with {}", url, name);
                    shortener
                }
                None => self.registry.passthrough(),
            },
        };

        shortener.expand(url).await
    }

    /// Paste `data`, trying `service` (or the default) first and then every
    /// other registered pastebin in registration order. Never fails: when no
    /// pastebin accepts the data, or `service` is unknown, the result is
    /// `PASTE_FAILED`.
    pub async fn paste(&self, data: &[u8], ext: &str, service: Option<&str>) -> String {
        let requested = service.unwrap_or(&self.default_pastebin);
        let Some(first) = self.registry.pastebin(requested) else {
            tracing::warn!("Unknown pastebin '{}'", requested);
            return PASTE_FAILED.to_string();
        };

        let mut candidates = vec![(requested, first)];
        candidates.extend(
            self.registry
                .pastebins()
                .filter(|(name, _)| *name != requested)
                .map(|(name, pastebin)| (name, pastebin.clone())),
        );

        for (name, pastebin) in candidates {
            match pastebin.paste(data, ext).await {
                Ok(url) => return url,
                Err(e) => tracing::warn!("Paste to {} failed: {}", name, e),
            }
        }

        PASTE_FAILED.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::application::errors::ServiceError;
    use crate::domain::traits::Pastebin;

    /// Shortener that either echoes a fixed result or fails with a service error
    struct Fixed {
        name: &'static str,
        result: Option<&'static str>,
    }

    #[async_trait]
    impl Shortener for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn shorten(&self, _url: &str, _custom: Option<&str>, _key: Option<&str>) -> WebResult<String> {
            match self.result {
                Some(short) => Ok(short.to_string()),
                None => Err(ServiceError::new("Rate limited", StatusCode::TOO_MANY_REQUESTS, "").into()),
            }
        }

        async fn expand(&self, _url: &str) -> WebResult<String> {
            Ok(format!("expanded by {}", self.name))
        }
    }

    struct CountingPastebin {
        name: &'static str,
        ok: bool,
        calls: AtomicUsize,
    }

    impl CountingPastebin {
        fn new(name: &'static str, ok: bool) -> Arc<Self> {
            Arc::new(Self { name, ok, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl Pastebin for CountingPastebin {
        fn name(&self) -> &str {
            self.name
        }

        async fn paste(&self, _data: &[u8], ext: &str) -> WebResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.ok {
                Ok(format!("https://{}/abc.{}", self.name, ext))
            } else {
                Err(ServiceError::new("Service Unavailable", StatusCode::SERVICE_UNAVAILABLE, "").into())
            }
        }
    }

    fn service(build: impl FnOnce(&mut ServiceRegistry)) -> WebService {
        let mut registry = ServiceRegistry::new(Arc::new(Fixed { name: "passthrough", result: None }));
        build(&mut registry);
        WebService::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_shorten_unknown_service() {
        let web = service(|_| {});
        let err = web.shorten("http://example.com", None, None, None).await.unwrap_err();
        assert!(matches!(err, WebError::UnknownService { family: ServiceFamily::Shortener, .. }));
    }

    #[tokio::test]
    async fn test_try_shorten_returns_input_on_service_error() {
        let web = service(|r| {
            r.register_shortener("is.gd", Arc::new(Fixed { name: "is.gd", result: None })).unwrap();
        });
        let short = web.try_shorten("http://example.com", None, None, None).await.unwrap();
        assert_eq!(short, "http://example.com");
        assert!(web.shorten("http://example.com", None, None, None).await.unwrap_err().is_service());
    }

    #[tokio::test]
    async fn test_try_shorten_still_rejects_unknown_service() {
        let web = service(|_| {});
        let err = web.try_shorten("http://example.com", None, None, Some("tinyurl")).await.unwrap_err();
        assert!(matches!(err, WebError::UnknownService { .. }));
    }

    #[tokio::test]
    async fn test_expand_dispatch() {
        let web = service(|r| {
            r.register_shortener("is.gd", Arc::new(Fixed { name: "is.gd", result: None })).unwrap();
            r.register_shortener("git.io", Arc::new(Fixed { name: "git.io", result: None })).unwrap();
        });

        assert_eq!(web.expand("http://git.io/abc", None).await.unwrap(), "expanded by git.io");
        assert_eq!(web.expand("http://bit.ly/abc", None).await.unwrap(), "expanded by passthrough");
        assert_eq!(web.expand("http://bit.ly/abc", Some("is.gd")).await.unwrap(), "expanded by is.gd");
        assert!(web.expand("http://is.gd/abc", Some("bit.ly")).await.is_err());
    }

    #[tokio::test]
    async fn test_paste_falls_back_to_next_backend() {
        let broken = CountingPastebin::new("hastebin", false);
        let working = CountingPastebin::new("paste.rs", true);
        let web = service(|r| {
            r.register_pastebin("hastebin", broken.clone()).unwrap();
            r.register_pastebin("paste.rs", working.clone()).unwrap();
        });

        assert_eq!(web.paste(b"hello", "rs", None).await, "https://paste.rs/abc.rs");
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
        assert_eq!(working.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_paste_tries_requested_backend_first() {
        let first = CountingPastebin::new("first", true);
        let second = CountingPastebin::new("second", true);
        let web = service(|r| {
            r.register_pastebin("first", first.clone()).unwrap();
            r.register_pastebin("second", second.clone()).unwrap();
        });

        assert_eq!(web.paste(b"x", "txt", Some("second")).await, "https://second/abc.txt");
        assert_eq!(first.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_paste_all_failing_returns_sentinel() {
        let a = CountingPastebin::new("a", false);
        let b = CountingPastebin::new("b", false);
        let web = service(|r| {
            r.register_pastebin("a", a.clone()).unwrap();
            r.register_pastebin("b", b.clone()).unwrap();
        });

        assert_eq!(web.paste(b"x", "txt", Some("a")).await, PASTE_FAILED);
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(b.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_paste_unknown_service_gives_up() {
        let only = CountingPastebin::new("only", true);
        let web = service(|r| {
            r.register_pastebin("only", only.clone()).unwrap();
        });

        assert_eq!(web.paste(b"x", "txt", Some("missing")).await, PASTE_FAILED);
        assert_eq!(only.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_paste_with_no_pastebins() {
        let web = service(|_| {});
        assert_eq!(web.paste(b"x", "txt", None).await, PASTE_FAILED);
    }
}
