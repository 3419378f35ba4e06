use std::sync::Arc;

use anyhow::anyhow;
use portfolio_di::Build;
use portfolio_extern_contracts::relay::{RelayApiService, RelayResponse};
use portfolio_models::contact::ContactSubmission;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

/// Path of the contact endpoint, relative to the relay base url.
pub const CONTACT_PATH: [&str; 2] = ["api", "contact"];

#[derive(Debug, Clone, Build)]
pub struct RelayApiServiceImpl {
    config: RelayApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct RelayApiServiceConfig {
    contact_endpoint: Arc<Url>,
}

impl RelayApiServiceConfig {
    pub fn new(relay_url: &Url) -> anyhow::Result<Self> {
        let mut contact_endpoint = relay_url.clone();
        contact_endpoint
            .path_segments_mut()
            .map_err(|()| anyhow!("Invalid relay url: {relay_url}"))?
            .pop_if_empty()
            .extend(CONTACT_PATH);

        Ok(Self {
            contact_endpoint: contact_endpoint.into(),
        })
    }

    pub fn contact_endpoint(&self) -> &Url {
        &self.contact_endpoint
    }
}

impl RelayApiService for RelayApiServiceImpl {
    async fn send_contact(&self, submission: ContactSubmission) -> anyhow::Result<RelayResponse> {
        let response = self
            .client
            .post((*self.config.contact_endpoint).clone())
            .json(&ContactRequest {
                name: &submission.name,
                email: &submission.email,
                message: &submission.message,
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!(status, "relay responded");

        let body = response
            .json::<ContactResponse>()
            .await
            .inspect_err(|err| warn!(status, "Failed to parse relay response: {err}"))
            .ok();

        Ok(match body {
            Some(body) => RelayResponse {
                status,
                success: body.success,
                message: body.message,
                error: body.error,
            },
            None => RelayResponse {
                status,
                success: false,
                message: None,
                error: None,
            },
        })
    }
}

#[derive(Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ContactResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_endpoint() {
        for (relay_url, expected) in [
            ("http://localhost:5000", "http://localhost:5000/api/contact"),
            ("http://localhost:5000/", "http://localhost:5000/api/contact"),
            (
                "https://example.com/relay",
                "https://example.com/relay/api/contact",
            ),
            (
                "https://example.com/relay/",
                "https://example.com/relay/api/contact",
            ),
        ] {
            let config = RelayApiServiceConfig::new(&relay_url.parse().unwrap()).unwrap();
            assert_eq!(config.contact_endpoint().as_str(), expected);
        }
    }

    #[test]
    fn cannot_be_a_base() {
        RelayApiServiceConfig::new(&"mailto:ada@example.com".parse().unwrap()).unwrap_err();
    }
}
