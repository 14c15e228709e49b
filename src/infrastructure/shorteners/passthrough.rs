//! Passthrough shortener - used when no provider matches

use async_trait::async_trait;
use reqwest::{header::LOCATION, Client, StatusCode};

use crate::application::errors::{ServiceError, WebResult};
use crate::domain::traits::Shortener;
use crate::infrastructure::http::ensure_success;

/// Leaves urls unshortened and expands by reading a redirect
pub struct Passthrough {
    client: Client,
}

impl Passthrough {
    /// `client` must not follow redirects, see `http::no_redirect_client`
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Shortener for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn shorten(&self, url: &str, _custom: Option<&str>, _key: Option<&str>) -> WebResult<String> {
        Ok(url.to_string())
    }

    async fn expand(&self, url: &str) -> WebResult<String> {
        follow_redirect(&self.client, url).await
    }
}

/// Request `url` and return the target of its `Location` header
pub async fn follow_redirect(client: &Client, url: &str) -> WebResult<String> {
    tracing::debug!("Probing redirect for {}", url);
    let response = ensure_success(client.get(url).send().await?).await?;

    if let Some(location) = response.headers().get(LOCATION) {
        if let Ok(location) = location.to_str() {
            return Ok(location.to_string());
        }
    }

    let status: StatusCode = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::new("That URL does not exist", status, body).into())
}
