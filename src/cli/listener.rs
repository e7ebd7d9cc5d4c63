//! Listener subcommands
//!
//! Listeners are addressed by the composite ID `sidecar_id:port` everywhere
//! but register, which takes the parts separately.

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use super::print_json;
use crate::altr::client::AltrClient;
use crate::altr::listener::RegisterListenerInput;
use crate::resource::ListenerId;
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum ListenerCmd {
    /// Register a listener port on a sidecar
    Register {
        #[arg(long)]
        sidecar_id: String,
        #[arg(long)]
        port: i64,
        /// Database type (Oracle, MSSQL, MySQL, or Postgres)
        #[arg(long)]
        database_type: String,
        /// Version string the listener advertises to connecting clients
        #[arg(long)]
        advertised_version: Option<String>,
    },
    /// Fetch a listener by `sidecar_id:port`
    Get {
        #[arg(long)]
        id: ListenerId,
    },
    /// List every listener on a sidecar
    List {
        #[arg(long)]
        sidecar_id: String,
    },
    /// Deregister a listener
    Deregister {
        #[arg(long)]
        id: ListenerId,
    },
}

impl ListenerCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            ListenerCmd::Register {
                sidecar_id,
                port,
                database_type,
                advertised_version,
            } => {
                validation::uuid("sidecar ID", &sidecar_id)?;
                let port = validation::port(port)?;
                validation::one_of(
                    "database_type",
                    &database_type,
                    validation::OLTP_DATABASE_TYPES,
                )?;
                if let Some(version) = &advertised_version {
                    validation::length_between("advertised_version", version, 1, 128)?;
                }

                let input = RegisterListenerInput {
                    port,
                    database_type,
                    advertised_version,
                };
                client
                    .register_listener(&sidecar_id, &input)
                    .await
                    .context("failed to register listener")
            }
            ListenerCmd::Get { id } => {
                match client
                    .get_listener(&id.sidecar_id, id.port)
                    .await
                    .context("failed to get listener")?
                {
                    Some(listener) => print_json(&listener),
                    None => bail!("listener {id} not found"),
                }
            }
            ListenerCmd::List { sidecar_id } => {
                validation::uuid("sidecar ID", &sidecar_id)?;
                let listeners = client
                    .list_listeners(&sidecar_id)
                    .await
                    .context("failed to list listeners")?;
                print_json(&listeners)
            }
            ListenerCmd::Deregister { id } => client
                .deregister_listener(&id.sidecar_id, id.port)
                .await
                .context("failed to deregister listener"),
        }
    }
}
