//! is.gd shortener

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::errors::{ServiceError, WebResult};
use crate::domain::traits::Shortener;
use crate::infrastructure::http::{decode_json, ensure_success};

/// is.gd provider. Success is signalled by the result field being present.
pub struct IsgdShortener {
    base_url: String,
    client: Client,
}

impl IsgdShortener {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> WebResult<(reqwest::StatusCode, String)> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).query(params).send().await?;
        let response = ensure_success(response).await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Response from create.php / forward.php
#[derive(Deserialize, Debug)]
struct IsgdResponse {
    shorturl: Option<String>,
    url: Option<String>,
    errormessage: Option<String>,
}

impl IsgdResponse {
    fn error_message(self) -> String {
        self.errormessage.unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[async_trait]
impl Shortener for IsgdShortener {
    fn name(&self) -> &str {
        "is.gd"
    }

    async fn shorten(&self, url: &str, custom: Option<&str>, _key: Option<&str>) -> WebResult<String> {
        let mut params = vec![("url", url), ("format", "json")];
        if let Some(custom) = custom {
            params.push(("shorturl", custom));
        }

        let (status, body) = self.call("create.php", &params).await?;
        let parsed: IsgdResponse = decode_json(status, &body)?;

        match parsed.shorturl {
            Some(short) => Ok(short),
            None => Err(ServiceError::new(parsed.error_message(), status, body).into()),
        }
    }

    async fn expand(&self, url: &str) -> WebResult<String> {
        let params = [("shorturl", url), ("format", "json")];

        let (status, body) = self.call("forward.php", &params).await?;
        let parsed: IsgdResponse = decode_json(status, &body)?;

        match parsed.url {
            Some(long) => Ok(long),
            None => Err(ServiceError::new(parsed.error_message(), status, body).into()),
        }
    }
}
