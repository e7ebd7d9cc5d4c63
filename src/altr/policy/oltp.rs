//! OLTP access management policies
//!
//! Rules grant `read`/`update`/`delete`/`create` access: actors are IdP users
//! or groups, objects are database/schema/table/column paths where each part
//! is either a literal name or a wildcard.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CreatePolicyResponse, GetPolicyResponse, POLICY_PATH};
use crate::altr::client::{escape, AltrClient, Gateway};
use crate::altr::error::Error;
use crate::altr::http::{expect_success, handle_response};

/// An OLTP access management policy as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpPolicy {
    #[serde(rename = "policy_id")]
    pub id: String,
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub database_type_name: String,
    pub database_type: i64,
    pub case_sensitivity: String,
    pub repo_name: String,
    pub created_at: String,
    pub updated_at: String,
    pub rules: Vec<OltpRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub actors: Vec<OltpActor>,
    pub objects: Vec<OltpObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpActor {
    #[serde(rename = "type")]
    pub actor_type: String,
    pub condition: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub identifiers: Vec<OltpIdentifier>,
}

/// A fully qualified object path; each part is a name or a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpIdentifier {
    pub database: OltpIdentifierPart,
    pub schema: OltpIdentifierPart,
    pub table: OltpIdentifierPart,
    pub column: OltpIdentifierPart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OltpIdentifierPart {
    pub name: String,
    pub wildcard: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOltpPolicyInput {
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub database_type_name: String,
    pub database_type: i64,
    pub case_sensitivity: String,
    pub repo_name: String,
    pub rules: Vec<OltpRule>,
}

impl AltrClient {
    /// Create an OLTP access management policy.
    pub async fn create_oltp_policy(
        &self,
        input: &CreateOltpPolicyInput,
    ) -> Result<OltpPolicy, Error> {
        let response = self
            .request(
                Method::POST,
                &format!("{POLICY_PATH}/accessManagement/oltp"),
                Some(input),
                Gateway::External,
            )
            .await?;

        let wrapped: CreatePolicyResponse<OltpPolicy> = handle_response(response).await?;
        let mut policy = wrapped.data.policy;
        policy.id = wrapped.data.policy_id;
        Ok(policy)
    }

    /// Fetch an OLTP policy by id. Absence is `Ok(None)`, not an error.
    pub async fn get_oltp_policy(&self, policy_id: &str) -> Result<Option<OltpPolicy>, Error> {
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

        let wrapped: GetPolicyResponse<OltpPolicy> = handle_response(response).await?;
        Ok(Some(wrapped.data))
    }

    /// The ALTR API has no OLTP policy update; fails without a network call.
    pub fn update_oltp_policy(&self) -> Result<OltpPolicy, Error> {
        Err(Error::Unsupported("OLTP access management policy update"))
    }

    /// Delete an OLTP policy. Deleting an already-absent policy succeeds.
    pub async fn delete_oltp_policy(&self, policy_id: &str) -> Result<(), Error> {
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
