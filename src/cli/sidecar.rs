//! Sidecar subcommands

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use super::print_json;
use crate::altr::client::AltrClient;
use crate::altr::sidecar::{CreateSidecarInput, UpdateSidecarInput};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum SidecarCmd {
    /// Register a new sidecar
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        hostname: String,
        /// First RSA public key (at least one key is required)
        #[arg(long)]
        public_key_1: Option<String>,
        /// Second RSA public key
        #[arg(long)]
        public_key_2: Option<String>,
        /// Pass queries the sidecar cannot parse through unmodified
        #[arg(long)]
        unsupported_query_bypass: bool,
    },
    /// Fetch a sidecar by ID
    Get {
        #[arg(long)]
        id: String,
    },
    /// Update an existing sidecar
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        hostname: Option<String>,
        #[arg(long)]
        public_key_1: Option<String>,
        #[arg(long)]
        public_key_2: Option<String>,
        #[arg(long)]
        unsupported_query_bypass: Option<bool>,
    },
    /// Delete a sidecar
    Delete {
        #[arg(long)]
        id: String,
    },
}

impl SidecarCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            SidecarCmd::Create {
                name,
                description,
                hostname,
                public_key_1,
                public_key_2,
                unsupported_query_bypass,
            } => {
                validation::sidecar_name(&name)?;
                validation::hostname(&hostname)?;
                validation::require_public_key(public_key_1.as_deref(), public_key_2.as_deref())?;

                let input = CreateSidecarInput {
                    name,
                    description,
                    hostname,
                    public_key_1,
                    public_key_2,
                    unsupported_query_bypass,
                };
                let sidecar = client
                    .create_sidecar(&input)
                    .await
                    .context("failed to create sidecar")?;
                print_json(&sidecar)
            }
            SidecarCmd::Get { id } => {
                validation::uuid("sidecar ID", &id)?;
                match client
                    .get_sidecar(&id)
                    .await
                    .context("failed to get sidecar")?
                {
                    Some(sidecar) => print_json(&sidecar),
                    None => bail!("sidecar {id} not found"),
                }
            }
            SidecarCmd::Update {
                id,
                name,
                description,
                hostname,
                public_key_1,
                public_key_2,
                unsupported_query_bypass,
            } => {
                validation::uuid("sidecar ID", &id)?;
                if let Some(name) = &name {
                    validation::sidecar_name(name)?;
                }
                if let Some(hostname) = &hostname {
                    validation::hostname(hostname)?;
                }

                let input = UpdateSidecarInput {
                    name,
                    description,
                    hostname,
                    public_key_1,
                    public_key_2,
                    unsupported_query_bypass,
                };
                let sidecar = client
                    .update_sidecar(&id, &input)
                    .await
                    .context("failed to update sidecar")?;
                print_json(&sidecar)
            }
            SidecarCmd::Delete { id } => {
                validation::uuid("sidecar ID", &id)?;
                client
                    .delete_sidecar(&id)
                    .await
                    .context("failed to delete sidecar")
            }
        }
    }
}
