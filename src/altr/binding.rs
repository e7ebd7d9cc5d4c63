//! Repo / sidecar binding operations
//!
//! A binding associates a repo with a sidecar listener port. Bindings have no
//! body of their own; the triple (sidecar, port, repo) in the path is the
//! whole identity.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{escape, AltrClient, Gateway};
use super::error::Error;
use super::http::{expect_success, handle_response};

/// A repo bound to a sidecar listener port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoSidecarBinding {
    pub port: u16,
    pub sidecar_id: String,
    pub repo_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetBindingOutput {
    repo_sidecar_binding: RepoSidecarBinding,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListBindingsOutput {
    repo_bindings: Vec<RepoSidecarBinding>,
}

fn binding_path(sidecar_id: &str, port: u16, repo_name: &str) -> String {
    format!(
        "/sidecars/{}/bindings/ports/{}/repos/{}",
        escape(sidecar_id),
        port,
        escape(repo_name)
    )
}

impl AltrClient {
    /// Bind a repo to a sidecar listener port.
    pub async fn bind_repo(
        &self,
        sidecar_id: &str,
        port: u16,
        repo_name: &str,
    ) -> Result<(), Error> {
        let response = self
            .request(
                Method::POST,
                &binding_path(sidecar_id, port, repo_name),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;
        expect_success(response).await
    }

    /// Fetch one binding. Absence is `Ok(None)`, not an error.
    pub async fn get_binding(
        &self,
        sidecar_id: &str,
        port: u16,
        repo_name: &str,
    ) -> Result<Option<RepoSidecarBinding>, Error> {
        let response = self
            .request(
                Method::GET,
                &binding_path(sidecar_id, port, repo_name),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let output: GetBindingOutput = handle_response(response).await?;
        Ok(Some(output.repo_sidecar_binding))
    }

    /// Remove a binding. Removing an already-absent binding succeeds.
    pub async fn unbind_repo(
        &self,
        sidecar_id: &str,
        port: u16,
        repo_name: &str,
    ) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &binding_path(sidecar_id, port, repo_name),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        expect_success(response).await
    }

    /// List every binding on a sidecar. An unknown sidecar yields an empty
    /// list.
    pub async fn list_sidecar_bindings(
        &self,
        sidecar_id: &str,
    ) -> Result<Vec<RepoSidecarBinding>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/sidecars/{}/bindings", escape(sidecar_id)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let output: ListBindingsOutput = handle_response(response).await?;
        Ok(output.repo_bindings)
    }

    /// List every binding for a repo. An unknown repo yields an empty list.
    pub async fn list_repo_bindings(
        &self,
        repo_name: &str,
    ) -> Result<Vec<RepoSidecarBinding>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/repos/{}/bindings", escape(repo_name)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let output: ListBindingsOutput = handle_response(response).await?;
        Ok(output.repo_bindings)
    }
}
