//! The I/O seam between request building and response parsing.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and yields the `HttpResponse`.
//! Its error type is the only error a client operation returns: failures
//! raised by the transport flow back to the caller through `?` untouched,
//! and the core's own failures are converted in via `From<ApiError>`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP round trips on behalf of the clients.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: From<ApiError> + std::error::Error + Send + Sync + 'static;

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// Failures of [`ReqwestTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// reqwest could not send the request or read the response.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// reqwest only accepts absolute URLs, so an empty base origin fails here
/// with [`TransportError::Request`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Error = TransportError;

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        debug!(status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
