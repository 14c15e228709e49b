use reqwest::{Client, StatusCode};
use url::Url;

use crate::application::errors::{ConfigError, WebError, WebResult};
use crate::domain::entities::Verdict;
use crate::infrastructure::config::Config;
use crate::infrastructure::http;
use crate::infrastructure::pagecheck::{page_text, StatusMarkers, VerdictMatcher};

pub const STATUS_FAILED: &str = "Failed to get status.";
pub const NOT_A_SITE: &str = "Huh? That doesn't look like a site on the interweb.";

/// Up/down checks, either by probing the host directly or by asking a
/// status aggregator
pub struct PageCheckService {
    client: Client,
    probe_client: Client,
    aggregator_url: String,
    matcher: Box<dyn VerdictMatcher>,
}

impl PageCheckService {
    /// `probe_client` must not follow redirects, see `http::no_redirect_client`
    pub fn new(client: Client, probe_client: Client, aggregator_url: impl Into<String>) -> Self {
        Self {
            client,
            probe_client,
            aggregator_url: aggregator_url.into().trim_end_matches('/').to_string(),
            matcher: Box::new(StatusMarkers::default()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client = http::client(&config.http)?;
        let probe_client = http::no_redirect_client(&config.http)?;
        Ok(Self::new(client, probe_client, &config.pagecheck.isup_url)
            .with_matcher(StatusMarkers::from_config(&config.pagecheck)))
    }

    pub fn with_matcher(mut self, matcher: impl VerdictMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Probe `input` directly. Only failing to connect means down; any
    /// response, or an error after the connection was made, means up.
    pub async fn check_up(&self, input: &str) -> String {
        let Some(base) = site_root(input) else {
            return format!("{} is not a valid URL", input.trim());
        };

        match self.probe(&base).await {
            Ok(status) => {
                tracing::debug!("{} answered with {}", base, status);
                format!("{} seems to be up", base)
            }
            // connect timeouts are reported as connect errors too
            Err(WebError::Transport(e)) if e.is_connect() => {
                tracing::debug!("{} unreachable: {}", base, e);
                format!("{} seems to be down", base)
            }
            Err(e) => {
                tracing::debug!("{} connected but failed: {}", base, e);
                format!("{} seems to be up", base)
            }
        }
    }

    async fn probe(&self, base: &str) -> WebResult<StatusCode> {
        let response = self.probe_client.get(base).send().await?;
        Ok(response.status())
    }

    /// Ask the status aggregator whether `input` is down for everyone
    pub async fn check_up_aggregator(&self, input: &str) -> String {
        let url = input.trim();
        let page = format!("{}/{}", self.aggregator_url, status_domain(url));
        tracing::debug!("GET {}", page);

        let html = match self.client.get(&page).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(html) => html,
                Err(_) => return STATUS_FAILED.to_string(),
            },
            Ok(response) => {
                tracing::debug!("{} answered with {}", page, response.status());
                return STATUS_FAILED.to_string();
            }
            Err(e) => {
                tracing::debug!("{} unreachable: {}", page, e);
                return STATUS_FAILED.to_string();
            }
        };

        match self.matcher.verdict(&page_text(&html)) {
            Some(Verdict::Down) => format!("It's not just you. {} looks {} from here!", url, Verdict::Down.as_str()),
            Some(Verdict::Up) => format!("It's just you. {} is {}.", url, Verdict::Up.as_str()),
            None => NOT_A_SITE.to_string(),
        }
    }
}

/// `scheme://host[:port]` of `input`, assuming http when no scheme is given
pub fn site_root(input: &str) -> Option<String> {
    let input = input.trim();
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Authority of `url` when it has one, otherwise the input up to any
/// query or fragment
pub fn status_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if parsed.has_host() => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            }
        }
        _ => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}
