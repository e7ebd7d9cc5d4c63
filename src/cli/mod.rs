//! Command-line surface
//!
//! One subcommand family per resource kind. Every handler follows the same
//! contract: validate the inputs client-side, make exactly one API call, and
//! print the result as pretty JSON on stdout. Fetching an absent resource
//! exits nonzero with a "not found" message; deleting an absent resource is
//! silent success.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::altr::client::AltrClient;

pub mod binding;
pub mod listener;
pub mod policy;
pub mod repo;
pub mod repo_user;
pub mod sidecar;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage sidecars
    #[command(subcommand)]
    Sidecar(sidecar::SidecarCmd),
    /// Manage repos
    #[command(subcommand)]
    Repo(repo::RepoCmd),
    /// Manage repo users
    #[command(subcommand, name = "repo-user")]
    RepoUser(repo_user::RepoUserCmd),
    /// Manage sidecar listener ports
    #[command(subcommand)]
    Listener(listener::ListenerCmd),
    /// Manage repo/sidecar bindings
    #[command(subcommand)]
    Binding(binding::BindingCmd),
    /// Manage access management and impersonation policies
    #[command(subcommand)]
    Policy(policy::PolicyCmd),
}

impl Command {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            Command::Sidecar(cmd) => cmd.run(client).await,
            Command::Repo(cmd) => cmd.run(client).await,
            Command::RepoUser(cmd) => cmd.run(client).await,
            Command::Listener(cmd) => cmd.run(client).await,
            Command::Binding(cmd) => cmd.run(client).await,
            Command::Policy(cmd) => cmd.run(client).await,
        }
    }
}

/// Render a result on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
