//! Resource identity layer
//!
//! Listener ports, bindings, and repo users have no server-issued ID; their
//! identity is a colon-delimited composite of natural keys. [`id`] holds the
//! builders and strict parsers for those composites.

pub mod id;

pub use id::{BindingId, IdParseError, ListenerId, RepoUserId};
