//! Repo user operations
//!
//! A repo user pairs a database username with exactly one credential store.
//! The store is a sum type on the send path, so a request can never carry
//! zero or two stores; the wire shape is the documented pair of optional
//! objects.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{escape, AltrClient, Gateway};
use super::error::Error;
use super::http::{expect_success, handle_response};

/// AWS Secrets Manager credential configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSecretsManager {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub iam_role: String,
    pub secrets_path: String,
}

/// Azure Key Vault credential configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureKeyVault {
    pub key_vault_uri: String,
    pub secret_name: String,
}

/// Exactly one credential store backs a repo user.
///
/// Serializes externally tagged, so flattening it into an input struct yields
/// the wire shape `{"aws_secrets_manager": {...}}` or
/// `{"azure_key_vault": {...}}` with exactly one key present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CredentialStore {
    #[serde(rename = "aws_secrets_manager")]
    AwsSecretsManager(AwsSecretsManager),
    #[serde(rename = "azure_key_vault")]
    AzureKeyVault(AzureKeyVault),
}

/// A repo user as returned by the API.
///
/// The response keeps the two optional fields rather than the sum type: the
/// server controls what it echoes, and this client must tolerate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoUser {
    pub username: String,
    pub repo_name: String,
    pub aws_secrets_manager: Option<AwsSecretsManager>,
    pub azure_key_vault: Option<AzureKeyVault>,
    pub created_at: String,
    pub updated_at: String,
}

impl RepoUser {
    /// The credential store the server reported, if any.
    pub fn credential_store(&self) -> Option<CredentialStore> {
        if let Some(aws) = &self.aws_secrets_manager {
            if !aws.iam_role.is_empty() || !aws.secrets_path.is_empty() {
                return Some(CredentialStore::AwsSecretsManager(aws.clone()));
            }
        }
        if let Some(azure) = &self.azure_key_vault {
            if !azure.key_vault_uri.is_empty() || !azure.secret_name.is_empty() {
                return Some(CredentialStore::AzureKeyVault(azure.clone()));
            }
        }
        None
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoUserInput {
    pub username: String,
    #[serde(flatten)]
    pub store: CredentialStore,
}

/// Update replaces the credential store wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRepoUserInput {
    #[serde(flatten)]
    pub store: CredentialStore,
}

impl AltrClient {
    /// Create a user on a repo.
    pub async fn create_repo_user(
        &self,
        repo_name: &str,
        input: &CreateRepoUserInput,
    ) -> Result<RepoUser, Error> {
        let response = self
            .request(
                Method::POST,
                &format!("/repos/{}/users", escape(repo_name)),
                Some(input),
                Gateway::Sidecar,
            )
            .await?;
        handle_response(response).await
    }

    /// Fetch a repo user. Absence is `Ok(None)`, not an error.
    pub async fn get_repo_user(
        &self,
        repo_name: &str,
        username: &str,
    ) -> Result<Option<RepoUser>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("/repos/{}/users/{}", escape(repo_name), escape(username)),
                None::<&()>,
                Gateway::Sidecar,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(handle_response(response).await?))
    }

    /// Replace a repo user's credential store.
    pub async fn update_repo_user(
        &self,
        repo_name: &str,
        username: &str,
        input: &UpdateRepoUserInput,
    ) -> Result<RepoUser, Error> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/repos/{}/users/{}", escape(repo_name), escape(username)),
                Some(input),
                Gateway::Sidecar,
            )
            .await?;
        handle_response(response).await
    }

    /// Delete a repo user. Deleting an already-absent user succeeds.
    pub async fn delete_repo_user(&self, repo_name: &str, username: &str) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/repos/{}/users/{}", escape(repo_name), escape(username)),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_input_serializes_exactly_one_store_key() {
        let input = CreateRepoUserInput {
            username: "svc_orders".to_string(),
            store: CredentialStore::AwsSecretsManager(AwsSecretsManager {
                iam_role: "arn:aws:iam::1:role/reader".to_string(),
                secrets_path: "prod/orders".to_string(),
            }),
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["username"], "svc_orders");
        assert_eq!(value["aws_secrets_manager"]["secrets_path"], "prod/orders");
        assert!(value.get("azure_key_vault").is_none());
    }

    #[test]
    fn empty_iam_role_is_omitted() {
        let input = UpdateRepoUserInput {
            store: CredentialStore::AwsSecretsManager(AwsSecretsManager {
                iam_role: String::new(),
                secrets_path: "prod/orders".to_string(),
            }),
        };

        let value = serde_json::to_value(&input).unwrap();
        assert!(value["aws_secrets_manager"].get("iam_role").is_none());
    }

    #[test]
    fn credential_store_accessor_ignores_empty_objects() {
        let user = RepoUser {
            username: "u".to_string(),
            repo_name: "r".to_string(),
            aws_secrets_manager: Some(AwsSecretsManager::default()),
            azure_key_vault: Some(AzureKeyVault {
                key_vault_uri: "https://kv.vault.azure.net".to_string(),
                secret_name: "orders".to_string(),
            }),
            ..Default::default()
        };

        match user.credential_store() {
            Some(CredentialStore::AzureKeyVault(kv)) => {
                assert_eq!(kv.secret_name, "orders");
            }
            other => panic!("expected Azure store, got {other:?}"),
        }
    }
}
