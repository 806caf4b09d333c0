//! Transport Abstraction
//!
//! The facade talks to the content backend through two injected capabilities:
//! executing a GraphQL request and POSTing a JSON body. Both are traits so
//! any client can be plugged in; reqwest-backed implementations are provided.

use crate::error::ContentError;
use crate::query::GraphqlRequest;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Executes a GraphQL request and returns the `data` object.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(&self, request: &GraphqlRequest) -> Result<serde_json::Value, ContentError>;
}

/// Raw reply from a REST POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs a JSON body and hands back status and body untouched.
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RestResponse, ContentError>;
}

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body kept in an `HttpStatus` error.
const MAX_ERROR_BODY: usize = 4096;

/// Build the shared reqwest client used by both transports.
pub fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ContentError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .default_headers(headers)
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ContentError::Config(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// GraphQL over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpGraphqlTransport {
    client: Client,
    endpoint: String,
}

impl HttpGraphqlTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ContentError> {
        let client = build_http_client(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphqlTransport for HttpGraphqlTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<serde_json::Value, ContentError> {
        debug!(
            operation = request.label(),
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ContentError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&bytes),
            });
        }

        let envelope: GraphqlEnvelope = serde_json::from_slice(&bytes)?;
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();

        match envelope.data {
            Some(data) if !data.is_null() => {
                if !messages.is_empty() {
                    warn!(
                        operation = request.label(),
                        errors = %messages.join("; "),
                        "GraphQL response carried partial errors"
                    );
                }
                Ok(data)
            }
            _ if !messages.is_empty() => Err(ContentError::Graphql { messages }),
            _ => Err(ContentError::Decode(
                "GraphQL response missing data".to_string(),
            )),
        }
    }
}

/// JSON POST over reqwest.
#[derive(Debug, Clone)]
pub struct HttpRestTransport {
    client: Client,
}

impl HttpRestTransport {
    pub fn new() -> Result<Self, ContentError> {
        Ok(Self::with_client(build_http_client(
            DEFAULT_CONNECT_TIMEOUT,
            DEFAULT_REQUEST_TIMEOUT,
        )?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RestTransport for HttpRestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RestResponse, ContentError> {
        debug!(url = %url, "Sending REST POST");
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RestResponse { status, body })
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
