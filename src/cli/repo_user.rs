//! Repo user subcommands
//!
//! Users are addressed by the composite ID `repo_name:username` everywhere
//! but create, which takes the parts separately.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use super::print_json;
use crate::altr::client::AltrClient;
use crate::altr::repo_user::{
    AwsSecretsManager, AzureKeyVault, CreateRepoUserInput, UpdateRepoUserInput,
};
use crate::resource::RepoUserId;
use crate::validation;

/// Credential store flags. Exactly one store must be configured.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// IAM role the sidecar assumes to read the secret (AWS only)
    #[arg(long)]
    aws_iam_role: Option<String>,
    /// Path of the secret in AWS Secrets Manager
    #[arg(long)]
    aws_secrets_path: Option<String>,
    /// Azure Key Vault URI
    #[arg(long)]
    azure_key_vault_uri: Option<String>,
    /// Name of the secret in the Azure Key Vault
    #[arg(long)]
    azure_secret_name: Option<String>,
}

impl StoreArgs {
    fn resolve(self) -> Result<crate::altr::repo_user::CredentialStore> {
        let aws = if self.aws_iam_role.is_some() || self.aws_secrets_path.is_some() {
            Some(AwsSecretsManager {
                iam_role: self.aws_iam_role.unwrap_or_default(),
                secrets_path: self.aws_secrets_path.unwrap_or_default(),
            })
        } else {
            None
        };
        let azure = if self.azure_key_vault_uri.is_some() || self.azure_secret_name.is_some() {
            Some(AzureKeyVault {
                key_vault_uri: self.azure_key_vault_uri.unwrap_or_default(),
                secret_name: self.azure_secret_name.unwrap_or_default(),
            })
        } else {
            None
        };
        Ok(validation::credential_store(aws, azure)?)
    }
}

#[derive(Debug, Subcommand)]
pub enum RepoUserCmd {
    /// Create a user on a repo
    Create {
        #[arg(long)]
        repo: String,
        #[arg(long)]
        username: String,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Fetch a repo user by `repo_name:username`
    Get {
        #[arg(long)]
        id: RepoUserId,
    },
    /// Replace a repo user's credential store
    Update {
        #[arg(long)]
        id: RepoUserId,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Delete a repo user
    Delete {
        #[arg(long)]
        id: RepoUserId,
    },
}

impl RepoUserCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            RepoUserCmd::Create {
                repo,
                username,
                store,
            } => {
                validation::repo_name(&repo)?;
                validation::username(&username)?;
                let store = store.resolve()?;

                let input = CreateRepoUserInput { username, store };
                let user = client
                    .create_repo_user(&repo, &input)
                    .await
                    .context("failed to create repo user")?;
                print_json(&user)
            }
            RepoUserCmd::Get { id } => {
                match client
                    .get_repo_user(&id.repo_name, &id.username)
                    .await
                    .context("failed to get repo user")?
                {
                    Some(user) => print_json(&user),
                    None => bail!("repo user {id} not found"),
                }
            }
            RepoUserCmd::Update { id, store } => {
                let store = store.resolve()?;
                let user = client
                    .update_repo_user(&id.repo_name, &id.username, &UpdateRepoUserInput { store })
                    .await
                    .context("failed to update repo user")?;
                print_json(&user)
            }
            RepoUserCmd::Delete { id } => client
                .delete_repo_user(&id.repo_name, &id.username)
                .await
                .context("failed to delete repo user"),
        }
    }
}
