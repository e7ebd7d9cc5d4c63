//! Policy subcommands
//!
//! Policy rule sets are too structured for flags, so creates take a JSON
//! document via `--file`. The document is validated client-side before the
//! request goes out. The control plane has no policy update; every change is
//! a delete-and-recreate.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde::de::DeserializeOwned;

use super::print_json;
use crate::altr::client::AltrClient;
use crate::altr::policy::{
    CreateImpersonationPolicyInput, CreateOltpPolicyInput, CreateSnowflakePolicyInput,
};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum PolicyCmd {
    /// Manage OLTP access management policies
    #[command(subcommand)]
    Oltp(OltpPolicyCmd),
    /// Manage Snowflake access management policies
    #[command(subcommand)]
    Snowflake(SnowflakePolicyCmd),
    /// Manage impersonation policies
    #[command(subcommand)]
    Impersonation(ImpersonationPolicyCmd),
}

impl PolicyCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            PolicyCmd::Oltp(cmd) => cmd.run(client).await,
            PolicyCmd::Snowflake(cmd) => cmd.run(client).await,
            PolicyCmd::Impersonation(cmd) => cmd.run(client).await,
        }
    }
}

fn read_input<T: DeserializeOwned>(file: &PathBuf) -> Result<T> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", file.display()))
}

fn validate_oltp_input(input: &CreateOltpPolicyInput) -> Result<()> {
    validation::length_between("policy_name", &input.name, 1, 255)?;
    validation::length_between("description", &input.description, 1, 255)?;
    validation::one_of(
        "database_type_name",
        &input.database_type_name,
        validation::OLTP_POLICY_DATABASE_TYPE_NAMES,
    )?;
    validation::repo_name(&input.repo_name)?;
    for rule in &input.rules {
        validation::one_of("rule type", &rule.rule_type, validation::OLTP_RULE_TYPES)?;
        for actor in &rule.actors {
            validation::one_of(
                "actor type",
                &actor.actor_type,
                validation::POLICY_ACTOR_TYPES,
            )?;
            validation::one_of("condition", &actor.condition, validation::POLICY_CONDITIONS)?;
            validation::unique_strings(&actor.identifiers)?;
        }
    }
    Ok(())
}

fn validate_snowflake_input(input: &CreateSnowflakePolicyInput) -> Result<()> {
    validation::length_between("policy_name", &input.name, 1, 255)?;
    validation::length_between("description", &input.description, 1, 255)?;
    for rule in &input.rules {
        for actor in &rule.actors {
            validation::one_of(
                "actor type",
                &actor.actor_type,
                validation::POLICY_ACTOR_TYPES,
            )?;
            validation::unique_strings(&actor.identifiers)?;
        }
        for object in &rule.objects {
            validation::unique_strings(&object.identifiers)?;
        }
    }
    Ok(())
}

fn validate_impersonation_input(input: &CreateImpersonationPolicyInput) -> Result<()> {
    validation::length_between("policy_name", &input.name, 1, 255)?;
    validation::length_between("description", &input.description, 1, 255)?;
    validation::repo_name(&input.repo_name)?;
    for rule in &input.rules {
        for party in rule.actors.iter().chain(rule.targets.iter()) {
            validation::one_of(
                "actor type",
                &party.actor_type,
                validation::POLICY_ACTOR_TYPES,
            )?;
            validation::one_of("condition", &party.condition, validation::POLICY_CONDITIONS)?;
            validation::unique_strings(&party.identifiers)?;
        }
    }
    Ok(())
}

#[derive(Debug, Subcommand)]
pub enum OltpPolicyCmd {
    /// Create an OLTP policy from a JSON document
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Fetch an OLTP policy by ID
    Get {
        #[arg(long)]
        id: String,
    },
    /// Delete an OLTP policy
    Delete {
        #[arg(long)]
        id: String,
    },
}

impl OltpPolicyCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            OltpPolicyCmd::Create { file } => {
                let input: CreateOltpPolicyInput = read_input(&file)?;
                validate_oltp_input(&input)?;
                let policy = client
                    .create_oltp_policy(&input)
                    .await
                    .context("failed to create OLTP policy")?;
                print_json(&policy)
            }
            OltpPolicyCmd::Get { id } => {
                validation::uuid("policy ID", &id)?;
                match client
                    .get_oltp_policy(&id)
                    .await
                    .context("failed to get OLTP policy")?
                {
                    Some(policy) => print_json(&policy),
                    None => bail!("OLTP policy {id} not found"),
                }
            }
            OltpPolicyCmd::Delete { id } => {
                validation::uuid("policy ID", &id)?;
                client
                    .delete_oltp_policy(&id)
                    .await
                    .context("failed to delete OLTP policy")
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SnowflakePolicyCmd {
    /// Create a Snowflake policy from a JSON document
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Fetch a Snowflake policy by ID
    Get {
        #[arg(long)]
        id: String,
    },
    /// Delete a Snowflake policy
    Delete {
        #[arg(long)]
        id: String,
    },
}

impl SnowflakePolicyCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            SnowflakePolicyCmd::Create { file } => {
                let input: CreateSnowflakePolicyInput = read_input(&file)?;
                validate_snowflake_input(&input)?;
                let policy = client
                    .create_snowflake_policy(&input)
                    .await
                    .context("failed to create Snowflake policy")?;
                print_json(&policy)
            }
            SnowflakePolicyCmd::Get { id } => {
                validation::uuid("policy ID", &id)?;
                match client
                    .get_snowflake_policy(&id)
                    .await
                    .context("failed to get Snowflake policy")?
                {
                    Some(policy) => print_json(&policy),
                    None => bail!("Snowflake policy {id} not found"),
                }
            }
            SnowflakePolicyCmd::Delete { id } => {
                validation::uuid("policy ID", &id)?;
                client
                    .delete_snowflake_policy(&id)
                    .await
                    .context("failed to delete Snowflake policy")
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ImpersonationPolicyCmd {
    /// Create an impersonation policy from a JSON document
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Fetch an impersonation policy by ID
    Get {
        #[arg(long)]
        id: String,
    },
    /// Delete an impersonation policy
    Delete {
        #[arg(long)]
        id: String,
    },
}

impl ImpersonationPolicyCmd {
    pub async fn run(self, client: &AltrClient) -> Result<()> {
        match self {
            ImpersonationPolicyCmd::Create { file } => {
                let input: CreateImpersonationPolicyInput = read_input(&file)?;
                validate_impersonation_input(&input)?;
                let policy = client
                    .create_impersonation_policy(&input)
                    .await
                    .context("failed to create impersonation policy")?;
                print_json(&policy)
            }
            ImpersonationPolicyCmd::Get { id } => {
                validation::uuid("policy ID", &id)?;
                match client
                    .get_impersonation_policy(&id)
                    .await
                    .context("failed to get impersonation policy")?
                {
                    Some(policy) => print_json(&policy),
                    None => bail!("impersonation policy {id} not found"),
                }
            }
            ImpersonationPolicyCmd::Delete { id } => {
                validation::uuid("policy ID", &id)?;
                client
                    .delete_impersonation_policy(&id)
                    .await
                    .context("failed to delete impersonation policy")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altr::policy::{OltpActor, OltpRule};

    fn oltp_input() -> CreateOltpPolicyInput {
        CreateOltpPolicyInput {
            name: "orders read".to_string(),
            description: "read access to orders".to_string(),
            database_type_name: "postgres".to_string(),
            database_type: 4,
            case_sensitivity: "case_sensitive".to_string(),
            repo_name: "orders".to_string(),
            rules: vec![OltpRule {
                rule_type: "read".to_string(),
                actors: vec![OltpActor {
                    actor_type: "idp_group".to_string(),
                    condition: "equals".to_string(),
                    identifiers: vec!["analysts".to_string()],
                }],
                objects: Vec::new(),
            }],
        }
    }

    #[test]
    fn well_formed_oltp_input_passes() {
        assert!(validate_oltp_input(&oltp_input()).is_ok());
    }

    #[test]
    fn oltp_input_rejects_unknown_rule_type() {
        let mut input = oltp_input();
        input.rules[0].rule_type = "grant".to_string();
        assert!(validate_oltp_input(&input).is_err());
    }

    #[test]
    fn oltp_input_rejects_capitalized_database_type_name() {
        let mut input = oltp_input();
        input.database_type_name = "Postgres".to_string();
        assert!(validate_oltp_input(&input).is_err());
    }

    #[test]
    fn oltp_input_rejects_duplicate_identifiers() {
        let mut input = oltp_input();
        input.rules[0].actors[0].identifiers =
            vec!["analysts".to_string(), "analysts".to_string()];
        assert!(validate_oltp_input(&input).is_err());
    }
}
