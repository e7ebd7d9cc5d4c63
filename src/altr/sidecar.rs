//! Sidecar operations
//!
//! A sidecar is a deployed network intermediary that proxies database traffic
//! and enforces policy. Identified by a server-issued ID.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{escape, AltrClient, Gateway};
use super::error::Error;
use super::http::{expect_success, handle_response};

/// A registered sidecar as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sidecar {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hostname: String,
    pub org_id: String,
    pub data_plane_url: String,
    pub listener_repo_binding_count: i64,
    pub listener_count: i64,
    pub public_key_1: Option<PublicKey>,
    pub public_key_2: Option<PublicKey>,
    pub unsupported_query_bypass: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A registered sidecar public key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKey {
    pub rsa_key: String,
    pub registered_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSidecarInput {
    pub name: String,
    pub description: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_2: Option<String>,
    pub unsupported_query_bypass: bool,
}

/// Patch-style update; absent fields are left untouched by the API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSidecarInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsupported_query_bypass: Option<bool>,
}

impl AltrClient {
    /// Register a new sidecar.
    pub async fn create_sidecar(&self, input: &CreateSidecarInput) -> Result<Sidecar, Error> {
        let response = self
            .request(Method::POST, "/sidecars", Some(input), Gateway::Sidecar)
            .await?;
        handle_response(response).await
    }

    /// Fetch a sidecar by ID. Absence is `Ok(None)`, not an error.
    pub async fn get_sidecar(&self, sidecar_id: &str) -> Result<Option<Sidecar>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/sidecars/{}", escape(sidecar_id)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(handle_response(response).await?))
    }

    /// Update an existing sidecar.
    pub async fn update_sidecar(
        &self,
        sidecar_id: &str,
        input: &UpdateSidecarInput,
    ) -> Result<Sidecar, Error> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/sidecars/{}", escape(sidecar_id)),
                Some(input),
                Gateway::Sidecar,
            )
            .await?;
        handle_response(response).await
    }

    /// Delete a sidecar. Deleting an already-absent sidecar succeeds.
    pub async fn delete_sidecar(&self, sidecar_id: &str) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/sidecars/{}", escape(sidecar_id)),
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
