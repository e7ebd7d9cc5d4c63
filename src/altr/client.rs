//! ALTR Client
//!
//! Main client for the ALTR control plane. One configured endpoint fans out
//! into three gateway base URLs, and a single Basic credential covers all of
//! them.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Serialize;
use url::Url;

use super::error::Error;

/// Marker token the configured base URL must contain. The external and
/// sidecar gateway hosts are derived by substituting it.
const GATEWAY_MARKER: &str = "altrnet";

/// Placeholder in the base URL replaced by the organization ID.
const ORG_ID_TOKEN: &str = "{orgID}";

/// Client-wide request timeout. Single attempt per call, no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which of the three derived base URLs a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gateway {
    /// The configured `altrnet` endpoint itself.
    #[default]
    Primary,
    /// The external API gateway (`altrnet` -> `api`, `/v1` suffix).
    External,
    /// The sidecar control gateway (`altrnet` -> `sc-control`, `/v1` suffix).
    Sidecar,
}

/// Client for the ALTR control plane.
///
/// Immutable after construction; any number of tasks may issue requests
/// through a shared reference concurrently. The underlying reqwest client
/// (and its connection pool) is reused across calls.
#[derive(Debug, Clone)]
pub struct AltrClient {
    http: reqwest::Client,
    base_url: String,
    external_url: String,
    sidecar_url: String,
    auth_header: String,
}

impl AltrClient {
    /// Create a new client from credentials and the org-scoped base URL.
    ///
    /// Fails if the base URL does not contain the `altrnet` marker or does
    /// not parse as a URL after `{orgID}` substitution.
    pub fn new(org_id: &str, api_key: &str, secret: &str, base_url: &str) -> Result<Self, Error> {
        let auth = BASE64.encode(format!("{api_key}:{secret}"));

        let mut base_url = base_url.to_string();
        if base_url.contains(ORG_ID_TOKEN) {
            base_url = base_url.replace(ORG_ID_TOKEN, org_id);
        }

        if !base_url.contains(GATEWAY_MARKER) {
            return Err(Error::Config(format!(
                "base URL must contain '{GATEWAY_MARKER}'"
            )));
        }

        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url:?}: {e}")))?;

        let external_url = format!("{}/v1", base_url.replacen(GATEWAY_MARKER, "api", 1));
        let sidecar_url = format!("{}/v1", base_url.replacen(GATEWAY_MARKER, "sc-control", 1));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            external_url,
            sidecar_url,
            auth_header: format!("Basic {auth}"),
        })
    }

    /// Base URL for a gateway.
    pub fn gateway_url(&self, gateway: Gateway) -> &str {
        match gateway {
            Gateway::Primary => &self.base_url,
            Gateway::External => &self.external_url,
            Gateway::Sidecar => &self.sidecar_url,
        }
    }

    /// Issue a single request against the chosen gateway.
    ///
    /// A `Some(body)` is JSON-encoded. The response is returned raw so
    /// callers can inspect the status (404-as-absence) before decoding.
    pub(crate) async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        gateway: Gateway,
    ) -> Result<Response, Error> {
        let url = format!("{}{}", self.gateway_url(gateway), path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Percent-escape a user-supplied path segment.
pub(crate) fn escape(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_gateway_urls_from_marker() {
        let client =
            AltrClient::new("org1", "key", "secret", "https://altrnet.example.com").unwrap();

        assert_eq!(
            client.gateway_url(Gateway::Primary),
            "https://altrnet.example.com"
        );
        assert_eq!(
            client.gateway_url(Gateway::External),
            "https://api.example.com/v1"
        );
        assert_eq!(
            client.gateway_url(Gateway::Sidecar),
            "https://sc-control.example.com/v1"
        );
    }

    #[test]
    fn substitutes_org_id_token() {
        let client = AltrClient::new(
            "acme",
            "key",
            "secret",
            "https://altrnet.{orgID}.example.com",
        )
        .unwrap();

        assert_eq!(
            client.gateway_url(Gateway::Primary),
            "https://altrnet.acme.example.com"
        );
        assert_eq!(
            client.gateway_url(Gateway::Sidecar),
            "https://sc-control.acme.example.com/v1"
        );
    }

    #[test]
    fn rejects_base_url_without_marker() {
        let err = AltrClient::new("org1", "key", "secret", "https://example.com").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("altrnet"));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = AltrClient::new("org1", "key", "secret", "not a url altrnet").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn escapes_path_segments() {
        assert_eq!(escape("my repo/1"), "my%20repo%2F1");
        assert_eq!(escape("plain"), "plain");
    }
}
