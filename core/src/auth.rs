//! Login and registration against `/api/auth`.

use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::http::{decode, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{LoginRequest, RegisterRequest, User};

/// Synchronous, stateless request builder and response parser for the auth
/// endpoints. Holds only the base origin.
#[derive(Debug, Clone)]
pub struct AuthApi {
    base_url: String,
}

impl AuthApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        HttpRequest::new(HttpMethod::Post, format!("{}/api/auth/login", self.base_url))
            .json(credentials)
    }

    pub fn build_register(&self, data: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        HttpRequest::new(HttpMethod::Post, format!("{}/api/auth/register", self.base_url))
            .json(data)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }
}

/// Async auth client: one request per call, errors returned as the
/// transport produced them.
#[derive(Debug, Clone)]
pub struct AuthClient<T> {
    api: AuthApi,
    transport: T,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            api: AuthApi::new(base_url),
            transport,
        }
    }

    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, T::Error> {
        debug!("Sending request");
        let request = self.api.build_login(credentials)?;
        let response = self.transport.execute(request).await?;
        Ok(self.api.parse_login(response)?)
    }

    #[instrument(skip_all, fields(email = %data.email, username = %data.username))]
    pub async fn register(&self, data: &RegisterRequest) -> Result<User, T::Error> {
        debug!("Sending request");
        let request = self.api.build_register(data)?;
        let response = self.transport.execute(request).await?;
        Ok(self.api.parse_register(response)?)
    }
}
