//! Snowflake access management policies
//!
//! Snowflake rules grant `read`/`write` access on objects addressed by name,
//! fully qualified path, or tag. Reads report rules split into pending,
//! applied, and failed lists; the flat `rules` list is only populated on
//! create.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CreatePolicyResponse, GetPolicyResponse, POLICY_PATH};
use crate::altr::client::{escape, AltrClient, Gateway};
use crate::altr::error::Error;
use crate::altr::http::{expect_success, handle_response};

/// A Snowflake access management policy as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakePolicy {
    #[serde(rename = "policy_id")]
    pub id: String,
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub rules: Vec<SnowflakeRule>,
    #[serde(rename = "rules_pending")]
    pub pending_rules: Vec<SnowflakeRule>,
    #[serde(rename = "rules_applied")]
    pub applied_rules: Vec<SnowflakeRule>,
    #[serde(rename = "rules_failed")]
    pub failed_rules: Vec<SnowflakeRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeRule {
    pub actors: Vec<SnowflakeActor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<SnowflakeObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tagged_objects: Vec<SnowflakeTaggedObject>,
    pub access: Vec<SnowflakeAccess>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeActor {
    #[serde(rename = "type")]
    pub actor_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub condition: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub condition: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fully_qualified_identifiers: Vec<SnowflakeFullyQualifiedIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeFullyQualifiedIdentifier {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub database: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub schema: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub table: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
}

/// Objects selected by Snowflake tag rather than by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeTaggedObject {
    pub check_against: Vec<String>,
    pub tagged_with: Vec<SnowflakeTag>,
    pub tag_condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeTag {
    pub database: String,
    pub schema: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeAccess {
    pub name: String,
}

/// Optional recurring re-application of the policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyMaintenance {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rate: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSnowflakePolicyInput {
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub rules: Vec<SnowflakeRule>,
    pub connection_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_maintenance: Option<PolicyMaintenance>,
}

impl AltrClient {
    /// Create a Snowflake access management policy.
    pub async fn create_snowflake_policy(
        &self,
        input: &CreateSnowflakePolicyInput,
    ) -> Result<SnowflakePolicy, Error> {
        let response = self
            .request(
                Method::POST,
                &format!("{POLICY_PATH}/accessManagement/snowflake"),
                Some(input),
                Gateway::External,
            )
            .await?;

        let wrapped: CreatePolicyResponse<SnowflakePolicy> = handle_response(response).await?;
        let mut policy = wrapped.data.policy;
        policy.id = wrapped.data.policy_id;
        Ok(policy)
    }

    /// Fetch a Snowflake policy by id. Absence is `Ok(None)`, not an error.
    pub async fn get_snowflake_policy(
        &self,
        policy_id: &str,
    ) -> Result<Option<SnowflakePolicy>, Error> {
        let response = self
            .request(
                Method::GET,
                &format!("{POLICY_PATH}/{}", escape(policy_id)),
                None::<&()>,
                Gateway::External,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let wrapped: GetPolicyResponse<SnowflakePolicy> = handle_response(response).await?;
        Ok(Some(wrapped.data))
    }

    /// The ALTR API has no Snowflake policy update; fails without a network
    /// call.
    pub fn update_snowflake_policy(&self) -> Result<SnowflakePolicy, Error> {
        Err(Error::Unsupported(
            "Snowflake access management policy update",
        ))
    }

    /// Delete a Snowflake policy. Deleting an already-absent policy succeeds.
    pub async fn delete_snowflake_policy(&self, policy_id: &str) -> Result<(), Error> {
        let response = self
            .request(
                Method::DELETE,
                &format!("{POLICY_PATH}/{}", escape(policy_id)),
                None::<&()>,
                Gateway::External,
            )
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        expect_success(response).await
    }
}
