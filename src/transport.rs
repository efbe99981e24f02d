// HTTP transport used by both clients
// One request per call, no retries; non-2xx statuses are failures.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, trace};

const USER_AGENT: &str = concat!("travel_search_tools/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HttpRequest {
    Get {
        url: String,
        query: Vec<(String, String)>,
        timeout: Duration,
    },
    Post {
        url: String,
        bearer_token: String,
        body: Value,
        timeout: Duration,
    },
}

impl HttpRequest {
    pub fn url(&self) -> &str {
        match self {
            HttpRequest::Get { url, .. } | HttpRequest::Post { url, .. } => url,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            HttpRequest::Get { timeout, .. } | HttpRequest::Post { timeout, .. } => *timeout,
        }
    }
}

// Anything able to run an HttpRequest and hand back the parsed JSON body
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

// Timeouts can surface while sending or while reading the body
fn classify(e: reqwest::Error, url: &str, timeout: Duration) -> TransportError {
    if e.is_timeout() {
        error!(url = %url, "Request timed out");
        return TransportError::Timeout(timeout);
    }
    error!(error = %e, "Network error");
    TransportError::Network(e)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<Value, TransportError> {
        let timeout = request.timeout();
        let builder = match request {
            HttpRequest::Get { url, query, .. } => self.client.get(url).query(query),
            HttpRequest::Post {
                url,
                bearer_token,
                body,
                ..
            } => self.client.post(url).bearer_auth(bearer_token).json(body),
        };

        debug!(url = %request.url(), ?timeout, "Sending request");

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, request.url(), timeout))?;

        let status = response.status();
        debug!(status = %status, "Received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Upstream returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, request.url(), timeout))?;
        trace!(body = %body, "Response body");

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidJson(e.to_string()))
    }
}
