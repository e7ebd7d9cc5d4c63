//! Repo operations
//!
//! A repo is a registered target database the sidecar fronts, identified by
//! name. Only the description can change after creation.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{escape, AltrClient, Gateway};
use super::error::Error;
use super::http::{expect_success, handle_response};

/// A registered repo as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    pub name: String,
    pub description: String,
    pub hostname: String,
    pub port: i64,
    #[serde(rename = "type")]
    pub database_type: String,
    pub user_count: i64,
    pub binding_count: i64,
    pub org_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRepoInput {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub database_type: String,
    pub hostname: String,
    pub port: i64,
}

/// Everything except the description is immutable once created.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepoInput {
    pub description: String,
}

impl AltrClient {
    /// Register a new repo.
    pub async fn create_repo(&self, input: &CreateRepoInput) -> Result<Repo, Error> {
        let response = self
            .request(Method::POST, "/repos", Some(input), Gateway::Sidecar)
            .await?;
        handle_response(response).await
    }

    /// Fetch a repo by name. Absence is `Ok(None)`, not an error.
    pub async fn get_repo(&self, repo_name: &str) -> Result<Option<Repo>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/repos/{}", escape(repo_name)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(handle_response(response).await?))
    }

    /// Update a repo's description.
    pub async fn update_repo(
        &self,
        repo_name: &str,
        input: &UpdateRepoInput,
    ) -> Result<Repo, Error> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/repos/{}", escape(repo_name)),
                Some(input),
                Gateway::Sidecar,
            )
            .await?;
        handle_response(response).await
    }

    /// Delete a repo. Deleting an already-absent repo succeeds.
    pub async fn delete_repo(&self, repo_name: &str) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/repos/{}", escape(repo_name)),
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
