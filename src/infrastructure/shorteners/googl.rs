//! goo.gl shortener (Google URL Shortener API)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::{ServiceError, WebResult};
use crate::domain::traits::Shortener;
use crate::infrastructure::http::{decode_json, ensure_success};

/// goo.gl provider. Failures arrive as an `error` object in the body.
pub struct GooglShortener {
    api_url: String,
    api_key: Option<String>,
    client: Client,
}

impl GooglShortener {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, client: Client) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            client,
        }
    }

    fn interpret(status: StatusCode, body: String, field: fn(GooglResponse) -> Option<String>) -> WebResult<String> {
        let parsed: GooglResponse = decode_json(status, &body)?;

        if let Some(error) = parsed.error {
            return Err(ServiceError::new(error.message, status, body).into());
        }

        match field(parsed) {
            Some(value) => Ok(value),
            None => Err(ServiceError::new("Missing url in response", status, body).into()),
        }
    }
}

/// API request structure
#[derive(Serialize)]
struct InsertRequest<'a> {
    #[serde(rename = "longUrl")]
    long_url: &'a str,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct GooglResponse {
    id: Option<String>,
    #[serde(rename = "longUrl")]
    long_url: Option<String>,
    error: Option<GooglError>,
}

#[derive(Deserialize, Debug)]
struct GooglError {
    message: String,
}

#[async_trait]
impl Shortener for GooglShortener {
    fn name(&self) -> &str {
        "goo.gl"
    }

    async fn shorten(&self, url: &str, _custom: Option<&str>, key: Option<&str>) -> WebResult<String> {
        let mut request = self.client
            .post(&self.api_url)
            .json(&InsertRequest { long_url: url });

        if let Some(key) = key.or(self.api_key.as_deref()) {
            request = request.query(&[("key", key)]);
        }

        tracing::debug!("POST {}", self.api_url);
        let response = ensure_success(request.send().await?).await?;
        let status = response.status();
        let body = response.text().await?;

        Self::interpret(status, body, |r| r.id)
    }

    async fn expand(&self, url: &str) -> WebResult<String> {
        tracing::debug!("GET {}", self.api_url);
        let response = self.client
            .get(&self.api_url)
            .query(&[("shortUrl", url)])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let status = response.status();
        let body = response.text().await?;

        Self::interpret(status, body, |r| r.long_url)
    }
}
