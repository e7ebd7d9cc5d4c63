//! Sidecar listener operations
//!
//! A listener is a port on a sidecar configured for a database protocol. The
//! API only exposes the collection, so a single-listener lookup lists the
//! sidecar's ports and picks the match.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{escape, AltrClient, Gateway};
use super::error::Error;
use super::http::{expect_success, handle_response};

/// A listener port as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerPort {
    pub port: u16,
    pub database_type: String,
    pub advertised_version: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterListenerInput {
    pub port: u16,
    pub database_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListListenersOutput {
    sidecar_listeners: Vec<ListenerPort>,
}

impl AltrClient {
    /// Register a listener port on a sidecar.
    pub async fn register_listener(
        &self,
        sidecar_id: &str,
        input: &RegisterListenerInput,
    ) -> Result<(), Error> {
        let response = self
            .request(
                Method::POST,
                &format!("/sidecars/{}/ports", escape(sidecar_id)),
                Some(input),
                Gateway::Sidecar,
            )
            .await?;
        expect_success(response).await
    }

    /// List every listener on a sidecar. An unknown sidecar yields an empty
    /// list.
    pub async fn list_listeners(&self, sidecar_id: &str) -> Result<Vec<ListenerPort>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/sidecars/{}/ports", escape(sidecar_id)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let output: ListListenersOutput = handle_response(response).await?;
        Ok(output.sidecar_listeners)
    }

    /// Fetch one listener by port. Absence is `Ok(None)`, not an error.
    pub async fn get_listener(
        &self,
        sidecar_id: &str,
        port: u16,
    ) -> Result<Option<ListenerPort>, Error> {
        let listeners = self.list_listeners(sidecar_id).await?;
        Ok(listeners.into_iter().find(|l| l.port == port))
    }

    /// Deregister a listener. Removing an already-absent port succeeds.
    pub async fn deregister_listener(&self, sidecar_id: &str, port: u16) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/sidecars/{}/ports/{}", escape(sidecar_id), port),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        expect_success(response).await
    }
}
