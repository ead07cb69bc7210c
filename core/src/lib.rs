//! Client-side service layer for the blog API.
//!
//! # Overview
//! Resolves the backend origin from the host environment and wraps the auth
//! (`/api/auth`) and content (`/api/posts`) endpoints.
//!
//! # Design
//! - `AuthApi` and `PostApi` are stateless: they hold only the base origin,
//!   build `HttpRequest` values and parse `HttpResponse` values without
//!   touching the network.
//! - `AuthClient` and `PostClient` pair an API with a [`Transport`] and issue
//!   exactly one request per call. Transport errors reach the caller as-is.
//! - `ClientConfig` is the only place that reads the environment.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod origin;
pub mod posts;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::{AuthApi, AuthClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, USER_ID_HEADER};
pub use origin::resolve_base_url;
pub use posts::{PostApi, PostClient};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{Comment, CreateCommentRequest, CreatePostRequest, LoginRequest, Post, RegisterRequest, User};
