//! Backend origin resolution.
//!
//! # Design
//! The resolver is a pure function of its inputs. Reading the ambient
//! hostname or environment is the job of [`ClientConfig`](crate::ClientConfig),
//! which passes both values in explicitly so every caller resolves origins
//! the same way.

/// Origin used when the client itself runs on `localhost`.
pub const LOCAL_ORIGIN: &str = "http://localhost:8080";

/// Origin of the production backend.
pub const PRODUCTION_ORIGIN: &str = "https://ingsw3-back-prod.onrender.com";

/// Origin of the QA backend.
pub const QA_ORIGIN: &str = "https://ingsw3-back-qa.onrender.com";

/// Resolve the backend origin for `hostname`.
///
/// Rules are checked in order and the first match wins:
/// 1. `localhost` maps to [`LOCAL_ORIGIN`].
/// 2. A hostname containing `front-prod` maps to [`PRODUCTION_ORIGIN`].
/// 3. A hostname containing `front-qa` maps to [`QA_ORIGIN`].
/// 4. Otherwise `override_url` is returned verbatim when present.
/// 5. Otherwise the empty string, meaning "relative to the current origin".
pub fn resolve_base_url(hostname: &str, override_url: Option<&str>) -> String {
    if hostname == "localhost" {
        return LOCAL_ORIGIN.to_string();
    }
    if hostname.contains("front-prod") {
        return PRODUCTION_ORIGIN.to_string();
    }
    if hostname.contains("front-qa") {
        return QA_ORIGIN.to_string();
    }
    override_url.map(str::to_string).unwrap_or_default()
}
