//! Pastebin integration tests
//! Run with: cargo test --test paste_test

use std::sync::{Arc, Once};

use carik_web::infrastructure::http;
use carik_web::infrastructure::pastebins::Hastebin;
use carik_web::{Config, Pastebin, ServiceRegistry, WebError, WebService, PASTE_FAILED};
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.pastebins.hastebin_server = server.uri();
    config
}

async fn mount_documents(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_hastebin_paste() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .and(body_string("fn main() {}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "abcdef"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let web = WebService::from_config(Arc::new(ServiceRegistry::with_defaults(&config).unwrap()), &config);

    let url = web.paste(b"fn main() {}", "rs", None).await;
    assert_eq!(url, format!("{}/abcdef.rs", server.uri()));
}

#[tokio::test]
async fn test_hastebin_errors() {
    ensure_init();
    let server = MockServer::start().await;
    mount_documents(&server, 201, json!({"message": "Document too large."})).await;

    let client = http::client(&Config::default().http).unwrap();
    let hastebin = Hastebin::new(server.uri(), client);

    match hastebin.paste(b"data", "txt").await {
        Err(WebError::Service(e)) => {
            assert_eq!(e.status, 201);
            assert_eq!(e.message, "Document too large.");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_paste_all_failing_returns_sentinel() {
    ensure_init();
    let server = MockServer::start().await;
    mount_documents(&server, 503, json!({"message": "down for maintenance"})).await;

    let config = config_for(&server);
    let web = WebService::from_config(Arc::new(ServiceRegistry::with_defaults(&config).unwrap()), &config);

    assert_eq!(web.paste(b"data", "txt", None).await, PASTE_FAILED);
    assert_eq!(web.paste(b"data", "txt", Some("hastebin")).await, "Unable to paste data");
}

#[tokio::test]
async fn test_paste_falls_back_to_mirror() {
    ensure_init();
    let broken = MockServer::start().await;
    mount_documents(&broken, 500, json!({"message": "boom"})).await;
    let mirror = MockServer::start().await;
    mount_documents(&mirror, 200, json!({"key": "mirrored"})).await;

    let config = config_for(&broken);
    let mut registry = ServiceRegistry::with_defaults(&config).unwrap();
    let client = http::client(&config.http).unwrap();
    registry.register_pastebin("mirror", Arc::new(Hastebin::new(mirror.uri(), client))).unwrap();
    let web = WebService::from_config(Arc::new(registry), &config);

    let url = web.paste(b"data", "md", Some("hastebin")).await;
    assert_eq!(url, format!("{}/mirrored.md", mirror.uri()));
}
