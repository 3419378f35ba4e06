use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use portfolio_api_rest::{RestServer, RestServerConfig, RestServerRealIpConfig};
use portfolio_core_contact_contracts::{ContactSendMessageError, MockContactFeatureService};
use portfolio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use portfolio_models::contact::ContactSubmission;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[tokio::test]
async fn sent() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Ok(()),
    );
    let url = start(contact, None).await;

    let response = post(
        &url,
        json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": true, "message": "Email sent successfully!"})
    );
}

#[tokio::test]
async fn fields_are_trimmed() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Ok(()),
    );
    let url = start(contact, None).await;

    let response = post(
        &url,
        json!({"name": " Ada ", "email": "ada@example.com\n", "message": "\tHi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_message() {
    let url = start(MockContactFeatureService::new(), None).await;

    let response = post(&url, json!({"name": "Ada", "email": "ada@example.com"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": false, "error": "Please fill all fields"})
    );
}

#[tokio::test]
async fn empty_or_blank_fields() {
    for body in [
        json!({"name": "", "email": "x@x.com", "message": "Hi"}),
        json!({"name": "Ada", "email": "   ", "message": "Hi"}),
        json!({"name": "Ada", "email": "x@x.com", "message": null}),
        json!({}),
    ] {
        let url = start(MockContactFeatureService::new(), None).await;

        let response = post(&url, body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"success": false, "error": "Please fill all fields"})
        );
    }
}

#[tokio::test]
async fn too_long() {
    let url = start(MockContactFeatureService::new(), None).await;

    let response = post(
        &url,
        json!({"name": "Ada", "email": "ada@example.com", "message": "x".repeat(5000)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": false, "error": "Message too long"})
    );
}

#[tokio::test]
async fn invalid_body() {
    let url = start(MockContactFeatureService::new(), None).await;

    for body in [
        json!({"name": 42, "email": "ada@example.com", "message": "Hi"}),
        json!("Ada, ada@example.com, Hi"),
    ] {
        let response = post(&url, body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"success": false, "error": "Invalid request body"})
        );
    }

    let response = reqwest::Client::new()
        .post(format!("{url}/api/contact"))
        .body("name=Ada")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn send_failed() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Err(ContactSendMessageError::Send),
    );
    let url = start(contact, None).await;

    let response = post(
        &url,
        json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": false, "error": "Failed to send email"})
    );
}

#[tokio::test]
async fn unexpected_error() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Err(ContactSendMessageError::Other(anyhow::anyhow!("boom"))),
    );
    let url = start(contact, None).await;

    let response = post(
        &url,
        json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": false, "error": "Internal server error"})
    );
}

#[tokio::test]
async fn rate_limited() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Err(ContactSendMessageError::RateLimited),
    );
    let url = start(contact, None).await;

    let response = post(
        &url,
        json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"success": false, "error": "Too many requests"})
    );
}

#[tokio::test]
async fn real_ip_from_trusted_proxy() {
    let real_ip = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9));
    let contact = MockContactFeatureService::new().with_send_message(
        real_ip,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Ok(()),
    );
    let real_ip_config = RestServerRealIpConfig {
        header: "x-real-ip".parse().unwrap(),
        set_from: LOCALHOST,
    };
    let url = start(contact, Some(real_ip_config)).await;

    let response = reqwest::Client::new()
        .post(format!("{url}/api/contact"))
        .header("X-Real-Ip", real_ip.to_string())
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn real_ip_from_untrusted_source_is_ignored() {
    let contact = MockContactFeatureService::new().with_send_message(
        LOCALHOST,
        ContactSubmission::new("Ada", "ada@example.com", "Hi").unwrap(),
        Ok(()),
    );
    let real_ip_config = RestServerRealIpConfig {
        header: "x-real-ip".parse().unwrap(),
        set_from: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
    };
    let url = start(contact, Some(real_ip_config)).await;

    let response = reqwest::Client::new()
        .post(format!("{url}/api/contact"))
        .header("X-Real-Ip", "203.0.113.9")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let url = start(MockContactFeatureService::new(), None).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{url}/api/contact"))
        .header("Origin", "https://portfolio.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn health() {
    for (email, status) in [
        (true, StatusCode::OK),
        (false, StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let health = MockHealthFeatureService::new().with_get_status(HealthStatus { email });
        let url = start_with(health, MockContactFeatureService::new(), None).await;

        let response = reqwest::get(format!("{url}/health")).await.unwrap();

        assert_eq!(response.status(), status);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"http": true, "email": email})
        );
    }
}

async fn post(url: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{url}/api/contact"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn start(
    contact: MockContactFeatureService,
    real_ip_config: Option<RestServerRealIpConfig>,
) -> String {
    start_with(MockHealthFeatureService::new(), contact, real_ip_config).await
}

async fn start_with(
    health: MockHealthFeatureService,
    contact: MockContactFeatureService,
    real_ip_config: Option<RestServerRealIpConfig>,
) -> String {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = RestServerConfig {
        addr: SocketAddr::new(LOCALHOST, 0),
        real_ip_config: real_ip_config.map(Arc::new),
    };
    let server = RestServer::new(config, health, contact);
    tokio::spawn(async move { server.serve_with_listener(listener).await.unwrap() });

    format!("http://{addr}")
}
