//! Unified-policy operations
//!
//! Three policy families share the external gateway's unified-policy surface:
//! OLTP access management, Snowflake access management, and impersonation.
//! Create responses arrive wrapped as `{"data": {"policy": .., "policy_id": ..}}`
//! and reads as `{"data": ..}`; the wrappers here unwrap both and copy the
//! server-issued id onto the returned policy. The API has no policy update;
//! the `update_*` operations fail statically instead of attempting a call.

use serde::Deserialize;

pub mod impersonation;
pub mod oltp;
pub mod snowflake;

pub use impersonation::{
    Actor, CreateImpersonationPolicyInput, ImpersonationPolicy, ImpersonationRule,
};
pub use oltp::{
    CreateOltpPolicyInput, OltpActor, OltpIdentifier, OltpIdentifierPart, OltpObject, OltpPolicy,
    OltpRule,
};
pub use snowflake::{
    CreateSnowflakePolicyInput, PolicyMaintenance, SnowflakeAccess, SnowflakeActor,
    SnowflakeFullyQualifiedIdentifier, SnowflakeObject, SnowflakePolicy, SnowflakeRule,
    SnowflakeTag, SnowflakeTaggedObject,
};

/// Base path for unified-policy management by id.
pub(crate) const POLICY_PATH: &str = "/unified-policy/management/policy";

/// `{"data": {"policy": .., "policy_id": ..}}` wrapper on create responses.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatePolicyResponse<T> {
    pub data: CreatePolicyData<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePolicyData<T> {
    pub policy: T,
    #[serde(default)]
    pub policy_id: String,
}

/// `{"data": ..}` wrapper on read responses.
#[derive(Debug, Deserialize)]
pub(crate) struct GetPolicyResponse<T> {
    pub data: T,
}
