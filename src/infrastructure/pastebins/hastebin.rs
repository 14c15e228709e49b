//! Hastebin pastebin

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::errors::{ServiceError, WebResult};
use crate::domain::traits::Pastebin;
use crate::infrastructure::http::{decode_json, ensure_success};

/// Hastebin (haste-server) document store
pub struct Hastebin {
    server: String,
    client: Client,
}

impl Hastebin {
    pub fn new(server: impl Into<String>, client: Client) -> Self {
        Self {
            server: server.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

/// Response from POST /documents
#[derive(Deserialize, Debug)]
struct DocumentResponse {
    key: Option<String>,
    message: Option<String>,
}

#[async_trait]
impl Pastebin for Hastebin {
    fn name(&self) -> &str {
        "hastebin"
    }

    async fn paste(&self, data: &[u8], ext: &str) -> WebResult<String> {
        let url = format!("{}/documents", self.server);
        tracing::debug!("POST {} ({} bytes)", url, data.len());

        let response = self.client.post(&url).body(data.to_vec()).send().await?;
        let response = ensure_success(response).await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: DocumentResponse = decode_json(status, &body)?;

        match (status, parsed.key) {
            (StatusCode::OK, Some(key)) => Ok(format!("{}/{}.{}", self.server, key, ext)),
            (StatusCode::OK, None) => Err(ServiceError::new("Missing document key", status, body).into()),
            _ => {
                let message = parsed.message.unwrap_or_else(|| "Unknown error".to_string());
                Err(ServiceError::new(message, status, body).into())
            }
        }
    }
}
