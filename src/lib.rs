//! Client library for the ALTR data security control plane.
//!
//! The [`altr`] module holds the HTTP client and per-resource API operations,
//! [`validation`] the client-side input checks, and [`resource`] the composite
//! identifiers exposed to users. The `altrctl` binary in `main.rs` wires these
//! into a command-line surface.

pub mod altr;
pub mod cli;
pub mod config;
pub mod resource;
pub mod validation;
