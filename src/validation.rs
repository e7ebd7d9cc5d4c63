//! Client-side input validation
//!
//! Everything the control plane would reject is checked here first, before a
//! request is built. The regex constants are compiled once and shared; the
//! functions are plain and take everything they need as arguments.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::altr::repo_user::{AwsSecretsManager, AzureKeyVault, CredentialStore};

/// Server-issued policy and sidecar IDs are v4 UUIDs.
pub static UUID_V4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("invalid UUID regex")
});

/// Repo names are alphanumeric plus underscore.
pub static ALPHANUMERIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("invalid name regex"));

/// RFC 1123 hostname.
pub static HOSTNAME_RFC1123: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9-]{0,62})(\.[a-zA-Z0-9][a-zA-Z0-9-]{0,62})*$")
        .expect("invalid hostname regex")
});

/// Database types accepted for repos and OLTP listeners.
pub const OLTP_DATABASE_TYPES: &[&str] = &["Oracle", "MSSQL", "MySQL", "Postgres"];

/// Lowercase database type names used by OLTP policies.
pub const OLTP_POLICY_DATABASE_TYPE_NAMES: &[&str] = &["oracle", "mssql", "mysql", "postgres"];

/// Access grants an OLTP policy rule may carry.
pub const OLTP_RULE_TYPES: &[&str] = &["read", "update", "delete", "create"];

/// Actor and target kinds in policy rules.
pub const POLICY_ACTOR_TYPES: &[&str] = &["idp_user", "idp_group"];

/// Conditions accepted on policy actors and targets.
pub const POLICY_CONDITIONS: &[&str] = &["equals"];

/// A rejected input value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Check a string length against inclusive bounds.
pub fn length_between(field: &str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(format!(
            "{field} must be between {min} and {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// Sidecar names: 1-64 characters.
pub fn sidecar_name(value: &str) -> Result<(), ValidationError> {
    length_between("name", value, 1, 64)
}

/// Repo names: 1-32 characters, alphanumeric and underscore.
pub fn repo_name(value: &str) -> Result<(), ValidationError> {
    length_between("repo name", value, 1, 32)?;
    if !ALPHANUMERIC_UNDERSCORE.is_match(value) {
        return Err(ValidationError::new(
            "repo name may only contain letters, digits, and underscores",
        ));
    }
    Ok(())
}

/// Repo usernames: 1-32 characters.
pub fn username(value: &str) -> Result<(), ValidationError> {
    length_between("username", value, 1, 32)
}

/// Hostnames: 1-500 characters, RFC 1123.
pub fn hostname(value: &str) -> Result<(), ValidationError> {
    length_between("hostname", value, 1, 500)?;
    if !HOSTNAME_RFC1123.is_match(value) {
        return Err(ValidationError::new(format!(
            "{value:?} is not a valid RFC 1123 hostname"
        )));
    }
    Ok(())
}

/// Listener and repo ports: 1-65535.
pub fn port(value: i64) -> Result<u16, ValidationError> {
    if !(1..=65535).contains(&value) {
        return Err(ValidationError::new(format!(
            "port must be between 1 and 65535, got {value}"
        )));
    }
    Ok(value as u16)
}

/// Server-issued IDs must look like v4 UUIDs.
pub fn uuid(field: &str, value: &str) -> Result<(), ValidationError> {
    if !UUID_V4.is_match(value) {
        return Err(ValidationError::new(format!(
            "{field} must be a UUID, got {value:?}"
        )));
    }
    Ok(())
}

/// Membership check against a fixed set.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(ValidationError::new(format!(
            "{field} must be one of {allowed:?}, got {value:?}"
        )));
    }
    Ok(())
}

/// Reject duplicate strings, naming every duplicated value.
pub fn unique_strings(values: &[String]) -> Result<(), ValidationError> {
    if values.len() <= 1 {
        return Ok(());
    }

    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for value in values {
        if !seen.insert(value.as_str()) && !duplicates.contains(&value.as_str()) {
            duplicates.push(value.as_str());
        }
    }

    if !duplicates.is_empty() {
        return Err(ValidationError::new(format!(
            "list contains duplicate values: {duplicates:?}; all values must be unique"
        )));
    }
    Ok(())
}

/// A sidecar must register at least one public key.
pub fn require_public_key(
    public_key_1: Option<&str>,
    public_key_2: Option<&str>,
) -> Result<(), ValidationError> {
    let has_key_1 = public_key_1.is_some_and(|k| !k.is_empty());
    let has_key_2 = public_key_2.is_some_and(|k| !k.is_empty());
    if !has_key_1 && !has_key_2 {
        return Err(ValidationError::new(
            "at least one of 'public_key_1' or 'public_key_2' must be specified",
        ));
    }
    Ok(())
}

/// Fold the two optional store configurations into the one allowed store.
///
/// Zero stores and two stores are both configuration errors; the sum type is
/// only constructible from exactly one.
pub fn credential_store(
    aws: Option<AwsSecretsManager>,
    azure: Option<AzureKeyVault>,
) -> Result<CredentialStore, ValidationError> {
    match (aws, azure) {
        (Some(aws), None) => {
            if aws.secrets_path.is_empty() {
                return Err(ValidationError::new(
                    "aws_secrets_manager.secrets_path must be specified and non-empty",
                ));
            }
            Ok(CredentialStore::AwsSecretsManager(aws))
        }
        (None, Some(azure)) => {
            if azure.key_vault_uri.is_empty() {
                return Err(ValidationError::new(
                    "azure_key_vault.key_vault_uri must be specified and non-empty",
                ));
            }
            if azure.secret_name.is_empty() {
                return Err(ValidationError::new(
                    "azure_key_vault.secret_name must be specified and non-empty",
                ));
            }
            Ok(CredentialStore::AzureKeyVault(azure))
        }
        (None, None) => Err(ValidationError::new(
            "exactly one credential store must be specified (aws_secrets_manager or azure_key_vault)",
        )),
        (Some(_), Some(_)) => Err(ValidationError::new(
            "only one credential store can be specified at a time",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_strings_rejects_duplicates_by_name() {
        let err = unique_strings(&["a".to_string(), "a".to_string()]).unwrap_err();
        assert!(err.to_string().contains("\"a\""));
    }

    #[test]
    fn unique_strings_accepts_distinct_values() {
        assert!(unique_strings(&["a".to_string(), "b".to_string()]).is_ok());
    }

    #[test]
    fn unique_strings_trivially_accepts_empty_and_singleton() {
        assert!(unique_strings(&[]).is_ok());
        assert!(unique_strings(&["a".to_string()]).is_ok());
    }

    #[test]
    fn credential_store_requires_exactly_one() {
        let err = credential_store(None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "exactly one credential store must be specified (aws_secrets_manager or azure_key_vault)"
        );

        let err = credential_store(
            Some(AwsSecretsManager {
                iam_role: String::new(),
                secrets_path: "p".to_string(),
            }),
            Some(AzureKeyVault {
                key_vault_uri: "https://kv".to_string(),
                secret_name: "s".to_string(),
            }),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "only one credential store can be specified at a time"
        );
    }

    #[test]
    fn credential_store_accepts_a_single_store() {
        let store = credential_store(
            None,
            Some(AzureKeyVault {
                key_vault_uri: "https://kv.vault.azure.net".to_string(),
                secret_name: "orders".to_string(),
            }),
        )
        .unwrap();
        assert!(matches!(store, CredentialStore::AzureKeyVault(_)));
    }

    #[test]
    fn credential_store_rejects_empty_required_fields() {
        let err = credential_store(
            Some(AwsSecretsManager::default()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("secrets_path"));
    }

    #[test]
    fn public_key_requires_at_least_one() {
        assert!(require_public_key(None, None).is_err());
        assert!(require_public_key(Some(""), Some("")).is_err());
        assert!(require_public_key(Some("ssh-rsa AAA"), None).is_ok());
        assert!(require_public_key(None, Some("ssh-rsa BBB")).is_ok());
    }

    #[test]
    fn port_bounds() {
        assert!(port(0).is_err());
        assert!(port(65536).is_err());
        assert_eq!(port(443).unwrap(), 443);
    }

    #[test]
    fn hostname_matches_rfc1123() {
        assert!(hostname("db.internal.example.com").is_ok());
        assert!(hostname("bad_host!").is_err());
        assert!(hostname("").is_err());
    }

    #[test]
    fn repo_name_charset() {
        assert!(repo_name("orders_db1").is_ok());
        assert!(repo_name("orders-db").is_err());
        assert!(repo_name(&"x".repeat(33)).is_err());
    }

    #[test]
    fn uuid_shape() {
        assert!(uuid("policy id", "6f1c0b5e-9b2a-4c3d-8e4f-0a1b2c3d4e5f").is_ok());
        assert!(uuid("policy id", "not-a-uuid").is_err());
    }

    #[test]
    fn one_of_membership() {
        assert!(one_of("database_type", "Postgres", OLTP_DATABASE_TYPES).is_ok());
        assert!(one_of("database_type", "SQLite", OLTP_DATABASE_TYPES).is_err());
    }
}
