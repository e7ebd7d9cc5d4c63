//! Repo subcommands

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use super::print_json;
use crate::altr::client::AltrClient;
use crate::altr::repo::{CreateRepoInput, UpdateRepoInput};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum RepoCmd {
    /// Register a new repo
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Database type (Oracle, MSSQL, MySQL, or Postgres)
        #[arg(long)]
        database_type: String,
        #[arg(long)]
        hostname: String,
        #[arg(long)]
        port: i64,
    },
    /// Fetch a repo by name
    Get {
        #[arg(long)]
        name: String,
    },
    /// Update a repo's description (everything else is immutable)
    Update {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Delete a repo
    Delete {
        #[arg(long)]
        name: String,
    },
    /// List a repo's sidecar bindings
    Bindings {
        #[arg(long)]
        name: String,
    },
}

impl RepoCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            RepoCmd::Create {
                name,
                description,
                database_type,
                hostname,
                port,
            } => {
                validation::repo_name(&name)?;
                validation::one_of(
                    "database_type",
                    &database_type,
                    validation::OLTP_DATABASE_TYPES,
                )?;
                validation::hostname(&hostname)?;
                let port = i64::from(validation::port(port)?);

                let input = CreateRepoInput {
                    name,
                    description,
                    database_type,
                    hostname,
                    port,
                };
                let repo = client
                    .create_repo(&input)
                    .await
                    .context("failed to create repo")?;
                print_json(&repo)
            }
            RepoCmd::Get { name } => {
                validation::repo_name(&name)?;
                match client.get_repo(&name).await.context("failed to get repo")? {
                    Some(repo) => print_json(&repo),
                    None => bail!("repo {name} not found"),
                }
            }
            RepoCmd::Update { name, description } => {
                validation::repo_name(&name)?;
                let repo = client
                    .update_repo(&name, &UpdateRepoInput { description })
                    .await
                    .context("failed to update repo")?;
                print_json(&repo)
            }
            RepoCmd::Delete { name } => {
                validation::repo_name(&name)?;
                client
                    .delete_repo(&name)
                    .await
                    .context("failed to delete repo")
            }
            RepoCmd::Bindings { name } => {
                validation::repo_name(&name)?;
                let bindings = client
                    .list_repo_bindings(&name)
                    .await
                    .context("failed to list repo bindings")?;
                print_json(&bindings)
            }
        }
    }
}
