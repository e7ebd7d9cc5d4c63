//! ALTR API interaction module
//!
//! This module provides the core functionality for talking to the ALTR
//! control plane: client construction, request/response handling, and
//! typed operations for every managed resource kind.
//!
//! # Module Structure
//!
//! - [`client`] - The `AltrClient`, gateway URL derivation, and request plumbing
//! - [`http`] - Response decoding and API error classification
//! - [`error`] - The client error type
//! - [`sidecar`], [`repo`], [`repo_user`], [`listener`], [`binding`] - per-resource operations
//! - [`policy`] - access management and impersonation policy operations
//!
//! # Example
//!
//! ```ignore
//! use altrctl::altr::client::AltrClient;
//!
//! async fn example() -> Result<(), altrctl::altr::error::Error> {
//!     let client = AltrClient::new("org", "key", "secret", "https://altrnet.example.com")?;
//!     let repo = client.get_repo("orders").await?;
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod client;
pub mod error;
pub mod http;
pub mod listener;
pub mod policy;
pub mod repo;
pub mod repo_user;
pub mod sidecar;
