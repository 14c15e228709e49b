//! HTTP helpers shared by every backend

use std::time::Duration;

use reqwest::{redirect, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::application::errors::{ConfigError, ServiceError};
use crate::infrastructure::config::HttpConfig;

/// Build the default client. Redirects are followed.
pub fn client(config: &HttpConfig) -> Result<Client, ConfigError> {
    builder(config)
        .build()
        .map_err(|e| ConfigError::Client(e.to_string()))
}

/// Build a client that hands 3xx responses back to the caller
pub fn no_redirect_client(config: &HttpConfig) -> Result<Client, ConfigError> {
    builder(config)
        .redirect(redirect::Policy::none())
        .build()
        .map_err(|e| ConfigError::Client(e.to_string()))
}

fn builder(config: &HttpConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .timeout(Duration::from_secs(config.timeout_secs))
}

/// Turn 4xx/5xx responses into a `ServiceError`. Other statuses pass through.
pub async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ServiceError::from_response(response).await);
    }
    Ok(response)
}

/// Decode a JSON body, reporting malformed payloads as a service failure
pub fn decode_json<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body)
        .map_err(|e| ServiceError::new(format!("Invalid response: {}", e), status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Key {
        key: String,
    }

    #[test]
    fn test_decode_json() {
        let key: Key = decode_json(StatusCode::OK, r#"{"key":"abc"}"#).unwrap();
        assert_eq!(key.key, "abc");
    }

    #[test]
    fn test_decode_json_keeps_body_on_failure() {
        let err = decode_json::<Key>(StatusCode::OK, "<html>").err().unwrap();
        assert_eq!(err.status, 200);
        assert_eq!(err.body, "<html>");
        assert!(err.message.starts_with("Invalid response"));
    }

    #[test]
    fn test_clients_build() {
        let config = HttpConfig::default();
        assert!(client(&config).is_ok());
        assert!(no_redirect_client(&config).is_ok());
    }
}
