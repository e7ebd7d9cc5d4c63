//! Impersonation policies
//!
//! An impersonation rule lets a set of actors (IdP users or groups) assume
//! the identity of a set of targets on one repo.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CreatePolicyResponse, GetPolicyResponse, POLICY_PATH};
use crate::altr::client::{escape, AltrClient, Gateway};
use crate::altr::error::Error;
use crate::altr::http::{expect_success, handle_response};

/// An impersonation policy as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpersonationPolicy {
    #[serde(rename = "policy_id")]
    pub id: String,
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub repo_name: String,
    pub created_at: String,
    pub updated_at: String,
    pub rules: Vec<ImpersonationRule>,
}

/// An IdP user or group reference; used for both actors and targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    #[serde(rename = "type")]
    pub actor_type: String,
    pub identifiers: Vec<String>,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpersonationRule {
    pub actors: Vec<Actor>,
    pub targets: Vec<Actor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateImpersonationPolicyInput {
    #[serde(rename = "policy_name")]
    pub name: String,
    pub description: String,
    pub repo_name: String,
    pub rules: Vec<ImpersonationRule>,
}

impl AltrClient {
    /// Create an impersonation policy.
    pub async fn create_impersonation_policy(
        &self,
        input: &CreateImpersonationPolicyInput,
    ) -> Result<ImpersonationPolicy, Error> {
        let response = self
            .request(
                Method::POST,
                &format!("{POLICY_PATH}/impersonation"),
                Some(input),
                Gateway::External,
            )
            .await?;

        let wrapped: CreatePolicyResponse<ImpersonationPolicy> = handle_response(response).await?;
        let mut policy = wrapped.data.policy;
        policy.id = wrapped.data.policy_id;
        Ok(policy)
    }

    /// Fetch an impersonation policy by id. Absence is `Ok(None)`, not an
    /// error.
    pub async fn get_impersonation_policy(
        &self,
        policy_id: &str,
    ) -> Result<Option<ImpersonationPolicy>, Error> {
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

        let wrapped: GetPolicyResponse<ImpersonationPolicy> = handle_response(response).await?;
        Ok(Some(wrapped.data))
    }

    /// The ALTR API has no impersonation policy update; fails without a
    /// network call.
    pub fn update_impersonation_policy(&self) -> Result<ImpersonationPolicy, Error> {
        Err(Error::Unsupported("impersonation policy update"))
    }

    /// Delete an impersonation policy. Deleting an already-absent policy
    /// succeeds.
    pub async fn delete_impersonation_policy(&self, policy_id: &str) -> Result<(), Error> {
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
