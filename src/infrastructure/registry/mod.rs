//! Service registry - Name-keyed shortener and pastebin backends
//!
//! Populated once at startup, read-only afterwards.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::application::errors::{ConfigError, RegistryError, ServiceFamily};
use crate::domain::traits::{Pastebin, Shortener};
use crate::infrastructure::config::Config;
use crate::infrastructure::http;
use crate::infrastructure::pastebins::Hastebin;
use crate::infrastructure::shorteners::{GitioShortener, GooglShortener, IsgdShortener, Passthrough};

static GLOBAL: OnceCell<Arc<ServiceRegistry>> = OnceCell::new();

/// Registry of backends, kept in registration order
pub struct ServiceRegistry {
    shorteners: Vec<(String, Arc<dyn Shortener>)>,
    pastebins: Vec<(String, Arc<dyn Pastebin>)>,
    passthrough: Arc<dyn Shortener>,
}

impl ServiceRegistry {
    /// Empty registry. `passthrough` expands urls no registered shortener claims.
    pub fn new(passthrough: Arc<dyn Shortener>) -> Self {
        Self {
            shorteners: Vec::new(),
            pastebins: Vec::new(),
            passthrough,
        }
    }

    /// Registry holding every built-in backend, configured from `config`
    pub fn with_defaults(config: &Config) -> Result<Self, ConfigError> {
        let client = http::client(&config.http)?;
        let no_redirect = http::no_redirect_client(&config.http)?;
        let shorteners = &config.shorteners;

        let mut registry = Self::new(Arc::new(Passthrough::new(no_redirect.clone())));
        let isgd = IsgdShortener::new(&shorteners.isgd_url, client.clone());
        let googl = GooglShortener::new(&shorteners.googl_url, shorteners.googl_key.clone(), client.clone());
        let gitio = GitioShortener::new(&shorteners.gitio_url, no_redirect);
        let duplicate = |e: RegistryError| ConfigError::InvalidValue(e.to_string());
        registry.register_shortener("is.gd", Arc::new(isgd)).map_err(duplicate)?;
        registry.register_shortener("goo.gl", Arc::new(googl)).map_err(duplicate)?;
        registry.register_shortener("git.io", Arc::new(gitio)).map_err(duplicate)?;

        let hastebin = Hastebin::new(&config.pastebins.hastebin_server, client);
        registry.register_pastebin("hastebin", Arc::new(hastebin)).map_err(duplicate)?;

        Ok(registry)
    }

    /// Register a shortener under `name`
    pub fn register_shortener(&mut self, name: impl Into<String>, shortener: Arc<dyn Shortener>) -> Result<(), RegistryError> {
        let name = name.into();
        if self.shorteners.iter().any(|(n, _)| *n == name) {
            return Err(RegistryError::Duplicate { family: ServiceFamily::Shortener, name });
        }
        self.shorteners.push((name, shortener));
        Ok(())
    }

    /// Register a pastebin under `name`
    pub fn register_pastebin(&mut self, name: impl Into<String>, pastebin: Arc<dyn Pastebin>) -> Result<(), RegistryError> {
        let name = name.into();
        if self.pastebins.iter().any(|(n, _)| *n == name) {
            return Err(RegistryError::Duplicate { family: ServiceFamily::Pastebin, name });
        }
        self.pastebins.push((name, pastebin));
        Ok(())
    }

    pub fn shortener(&self, name: &str) -> Option<Arc<dyn Shortener>> {
        self.shorteners.iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.clone())
    }

    pub fn pastebin(&self, name: &str) -> Option<Arc<dyn Pastebin>> {
        self.pastebins.iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
    }

    pub fn shortener_names(&self) -> Vec<&str> {
        self.shorteners.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn pastebin_names(&self) -> Vec<&str> {
        self.pastebins.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Pastebins in registration order
    pub fn pastebins(&self) -> impl Iterator<Item = (&str, &Arc<dyn Pastebin>)> {
        self.pastebins.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// First registered shortener whose name appears in `url`
    pub fn infer_shortener(&self, url: &str) -> Option<(&str, Arc<dyn Shortener>)> {
        self.shorteners.iter()
            .find(|(name, _)| claims_url(name, url))
            .map(|(name, s)| (name.as_str(), s.clone()))
    }

    pub fn passthrough(&self) -> Arc<dyn Shortener> {
        self.passthrough.clone()
    }

    /// Install `self` as the process-wide registry. Only the first call succeeds.
    pub fn install(self) -> Result<Arc<ServiceRegistry>, RegistryError> {
        let registry = Arc::new(self);
        GLOBAL.set(registry.clone())
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        tracing::info!(
            "Service registry installed: shorteners={:?} pastebins={:?}",
            registry.shortener_names(),
            registry.pastebin_names(),
        );
        Ok(registry)
    }

    /// The installed process-wide registry, if any
    pub fn global() -> Option<Arc<ServiceRegistry>> {
        GLOBAL.get().cloned()
    }
}

/// Whether a shortened url looks like it came from provider `name`.
/// A plain substring test on the domain fragment.
pub fn claims_url(name: &str, url: &str) -> bool {
    url.contains(name)
}
