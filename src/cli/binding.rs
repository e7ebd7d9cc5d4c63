//! Binding subcommands
//!
//! Bindings are addressed by the composite ID `sidecar_id:port:repo_name`
//! everywhere but create, which takes the parts separately.

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use super::print_json;
use crate::altr::client::AltrClient;
use crate::resource::BindingId;
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum BindingCmd {
    /// Bind a repo to a sidecar listener port
    Create {
        #[arg(long)]
        sidecar_id: String,
        #[arg(long)]
        port: i64,
        #[arg(long)]
        repo: String,
    },
    /// Fetch a binding by `sidecar_id:port:repo_name`
    Get {
        #[arg(long)]
        id: BindingId,
    },
    /// List every binding on a sidecar
    List {
        #[arg(long)]
        sidecar_id: String,
    },
    /// Remove a binding
    Delete {
        #[arg(long)]
        id: BindingId,
    },
}

impl BindingCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            BindingCmd::Create {
                sidecar_id,
                port,
                repo,
            } => {
                validation::uuid("sidecar ID", &sidecar_id)?;
                let port = validation::port(port)?;
                validation::repo_name(&repo)?;

                client
                    .bind_repo(&sidecar_id, port, &repo)
                    .await
                    .context("failed to bind repo")
            }
            BindingCmd::Get { id } => {
                match client
                    .get_binding(&id.sidecar_id, id.port, &id.repo_name)
                    .await
                    .context("failed to get binding")?
                {
                    Some(binding) => print_json(&binding),
                    None => bail!("binding {id} not found"),
                }
            }
            BindingCmd::List { sidecar_id } => {
                validation::uuid("sidecar ID", &sidecar_id)?;
                let bindings = client
                    .list_sidecar_bindings(&sidecar_id)
                    .await
                    .context("failed to list bindings")?;
                print_json(&bindings)
            }
            BindingCmd::Delete { id } => client
                .unbind_repo(&id.sidecar_id, id.port, &id.repo_name)
                .await
                .context("failed to unbind repo"),
        }
    }
}
