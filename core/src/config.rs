//! Client configuration loaded from the environment.
//!
//! # Design
//! All ambient lookups happen here, once. The resolved values are handed to
//! [`resolve_base_url`] explicitly, so the auth and post clients built from
//! one `ClientConfig` always share the same origin.

use serde::Deserialize;

use crate::auth::AuthClient;
use crate::error::ConfigError;
use crate::origin::resolve_base_url;
use crate::posts::PostClient;
use crate::transport::Transport;

const ENV_PREFIX: &str = "BLOG_";

/// Inputs to origin resolution.
///
/// Loaded from `BLOG_HOSTNAME` and `BLOG_API_URL`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host the client reports itself as.
    #[serde(default)]
    pub hostname: String,

    /// Environment-provided origin, used when no hostname rule matches.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Caller-supplied origin; wins over `api_url`.
    #[serde(skip)]
    pub override_url: Option<String>,
}

impl ClientConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }

    /// Load from explicit `(name, value)` pairs, using the same variable names
    /// as [`ClientConfig::from_env`].
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?)
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_override(mut self, url: impl Into<String>) -> Self {
        self.override_url = Some(url.into());
        self
    }

    /// Hostname rules, then the explicit override, then `BLOG_API_URL`,
    /// then the empty string.
    pub fn base_url(&self) -> String {
        let override_url = self.override_url.as_deref().or(self.api_url.as_deref());
        resolve_base_url(&self.hostname, override_url)
    }

    pub fn auth_client<T: Transport>(&self, transport: T) -> AuthClient<T> {
        AuthClient::new(&self.base_url(), transport)
    }

    pub fn post_client<T: Transport>(&self, transport: T) -> PostClient<T> {
        PostClient::new(&self.base_url(), transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::{LOCAL_ORIGIN, QA_ORIGIN};
    use crate::ReqwestTransport;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn loads_prefixed_variables() {
        let config = ClientConfig::from_vars(vars(&[
            ("BLOG_HOSTNAME", "myapp-front-qa.onrender.com"),
            ("BLOG_API_URL", "https://custom-backend.com"),
            ("HOSTNAME", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.hostname, "myapp-front-qa.onrender.com");
        assert_eq!(config.api_url.as_deref(), Some("https://custom-backend.com"));
        assert_eq!(config.base_url(), QA_ORIGIN);
    }

    #[test]
    fn missing_variables_fall_back_to_empty_origin() {
        let config = ClientConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url(), "");
    }

    #[test]
    fn environment_override_applies_to_unmatched_hosts() {
        let config =
            ClientConfig::from_vars(vars(&[("BLOG_API_URL", "https://custom-backend.com")])).unwrap();
        assert_eq!(config.base_url(), "https://custom-backend.com");
    }

    #[test]
    fn explicit_override_beats_environment_override() {
        let config = ClientConfig::default()
            .with_hostname("unknown.com")
            .with_override("https://explicit.example");
        let config = ClientConfig {
            api_url: Some("https://from-env.example".to_string()),
            ..config
        };
        assert_eq!(config.base_url(), "https://explicit.example");
    }

    #[test]
    fn hostname_rules_beat_explicit_override() {
        let config = ClientConfig::default()
            .with_hostname("localhost")
            .with_override("https://explicit.example");
        assert_eq!(config.base_url(), LOCAL_ORIGIN);
    }

    #[test]
    fn both_clients_share_the_resolved_origin() {
        let config = ClientConfig::default().with_hostname("localhost");
        let auth = config.auth_client(ReqwestTransport::default());
        let posts = config.post_client(ReqwestTransport::default());
        assert_eq!(auth.api().base_url(), LOCAL_ORIGIN);
        assert_eq!(
            posts.api().build_get_all_posts().path,
            format!("{LOCAL_ORIGIN}/api/posts")
        );
    }
}
