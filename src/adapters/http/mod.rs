//! HTTP gateway adapter - reqwest implementation of `RegistrationGateway`.
//!
//! One pooled client, built once with a timeout. Every request carries the
//! session's fixed header set, browser-shaped headers included, plus the
//! bearer credential from configuration.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, REFERER, USER_AGENT};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use tracing::debug;

use crate::ports::{GatewayError, RegistrationGateway, RegistrationRequest};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101 Firefox/91.0";

/// Failures building the gateway. Startup-fatal: nothing downstream can run
/// without a working client.
#[derive(Debug, Error)]
pub enum HttpGatewayBuildError {
    #[error("Auth token is not a valid header value")]
    InvalidToken,

    #[error("Referer is not a valid header value")]
    InvalidReferer,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// `RegistrationGateway` backed by the registration endpoint over HTTPS.
pub struct HttpRegistrationGateway {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HttpRegistrationGateway {
    pub fn new(
        endpoint: impl Into<String>,
        referer: &str,
        token: &Secret<String>,
        timeout: Duration,
    ) -> Result<Self, HttpGatewayBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(referer).map_err(|_| HttpGatewayBuildError::InvalidReferer)?,
        );
        let mut auth = HeaderValue::from_str(token.expose_secret())
            .map_err(|_| HttpGatewayBuildError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            headers,
        })
    }
}

#[async_trait]
impl RegistrationGateway for HttpRegistrationGateway {
    async fn submit(&self, request: &RegistrationRequest) -> Result<Vec<u8>, GatewayError> {
        debug!(course = %request.course, units = %request.units, "submitting registration");

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}
