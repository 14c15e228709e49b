//! git.io shortener

use async_trait::async_trait;
use reqwest::{header::LOCATION, Client, StatusCode};

use crate::application::errors::{ServiceError, WebResult};
use crate::domain::traits::Shortener;
use crate::infrastructure::http::ensure_success;
use super::passthrough::follow_redirect;

/// git.io provider. A short url is only issued with `201 Created`.
pub struct GitioShortener {
    base_url: String,
    client: Client,
}

impl GitioShortener {
    /// `client` must not follow redirects; it is also used by `expand`
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl Shortener for GitioShortener {
    fn name(&self) -> &str {
        "git.io"
    }

    async fn shorten(&self, url: &str, custom: Option<&str>, _key: Option<&str>) -> WebResult<String> {
        let mut form = vec![("url", url)];
        if let Some(code) = custom {
            form.push(("code", code));
        }

        tracing::debug!("POST {}", self.base_url);
        let response = self.client.post(&self.base_url).form(&form).send().await?;
        let response = ensure_success(response).await?;
        let status = response.status();

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await.unwrap_or_default();

        match (status, location) {
            (StatusCode::CREATED, Some(location)) => {
                // git.io silently hands back a different code when the custom one is taken
                if let Some(code) = custom {
                    if !location.contains(code) {
                        return Err(ServiceError::new("That URL is already in use", status, body).into());
                    }
                }
                Ok(location)
            }
            _ => Err(ServiceError::new(body.clone(), status, body).into()),
        }
    }

    async fn expand(&self, url: &str) -> WebResult<String> {
        follow_redirect(&self.client, url).await
    }
}
