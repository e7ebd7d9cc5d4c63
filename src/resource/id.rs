//! Composite resource identifiers
//!
//! Colon-delimited natural keys, e.g. `sidecar-1:443:orders`. Parsing is
//! strict: the segment count must match exactly and ports must be numeric,
//! so a mistyped ID fails instead of silently addressing the wrong resource.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DELIMITER: char = ':';

/// A composite ID that did not parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("expected ID in format {expected:?}, got {got:?}")]
    Format { expected: &'static str, got: String },
    #[error("invalid port {0:?}: must be an integer between 1 and 65535")]
    Port(String),
}

fn parse_port(segment: &str) -> Result<u16, IdParseError> {
    match segment.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(IdParseError::Port(segment.to_string())),
    }
}

/// Identity of a repo/sidecar binding: `sidecar_id:port:repo_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingId {
    pub sidecar_id: String,
    pub port: u16,
    pub repo_name: String,
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.sidecar_id, self.port, self.repo_name
        )
    }
}

impl FromStr for BindingId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        let [sidecar_id, port, repo_name] = parts.as_slice() else {
            return Err(IdParseError::Format {
                expected: "sidecar_id:port:repo_name",
                got: s.to_string(),
            });
        };

        Ok(Self {
            sidecar_id: sidecar_id.to_string(),
            port: parse_port(port)?,
            repo_name: repo_name.to_string(),
        })
    }
}

/// Identity of a sidecar listener: `sidecar_id:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerId {
    pub sidecar_id: String,
    pub port: u16,
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.sidecar_id, self.port)
    }
}

impl FromStr for ListenerId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        let [sidecar_id, port] = parts.as_slice() else {
            return Err(IdParseError::Format {
                expected: "sidecar_id:port",
                got: s.to_string(),
            });
        };

        Ok(Self {
            sidecar_id: sidecar_id.to_string(),
            port: parse_port(port)?,
        })
    }
}

/// Identity of a repo user: `repo_name:username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUserId {
    pub repo_name: String,
    pub username: String,
}

impl fmt::Display for RepoUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.repo_name, self.username)
    }
}

impl FromStr for RepoUserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        let [repo_name, username] = parts.as_slice() else {
            return Err(IdParseError::Format {
                expected: "repo_name:username",
                got: s.to_string(),
            });
        };

        Ok(Self {
            repo_name: repo_name.to_string(),
            username: username.to_string(),
        })
    }
}
