//! Configuration Management
//!
//! Resolves the provider credentials and endpoint: a CLI flag wins over its
//! environment variable, and anything still missing fails fast before a
//! client is built.

use crate::altr::error::Error;

pub const ENV_ORG_ID: &str = "ALTR_ORG_ID";
pub const ENV_API_KEY: &str = "ALTR_API_KEY";
pub const ENV_SECRET: &str = "ALTR_SECRET";
pub const ENV_BASE_URL: &str = "ALTR_BASE_URL";

/// Partially-specified settings, as collected from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub org_id: Option<String>,
    pub api_key: Option<String>,
    pub secret: Option<String>,
    pub base_url: Option<String>,
}

/// Fully-resolved configuration, ready to construct a client.
#[derive(Debug, Clone)]
pub struct Config {
    pub org_id: String,
    pub api_key: String,
    pub secret: String,
    pub base_url: String,
}

impl Settings {
    /// Fill gaps from the environment and require every value.
    pub fn resolve(self) -> Result<Config, Error> {
        Ok(Config {
            org_id: resolve_value(self.org_id, ENV_ORG_ID, "organization ID")?,
            api_key: resolve_value(self.api_key, ENV_API_KEY, "API key")?,
            secret: resolve_value(self.secret, ENV_SECRET, "secret")?,
            base_url: resolve_value(self.base_url, ENV_BASE_URL, "base URL")?,
        })
    }
}

fn resolve_value(flag: Option<String>, env_var: &str, what: &str) -> Result<String, Error> {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "missing {what}: set the flag or the {env_var} environment variable"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings() -> Settings {
        Settings {
            org_id: Some("org".to_string()),
            api_key: Some("key".to_string()),
            secret: Some("secret".to_string()),
            base_url: Some("https://altrnet.example.com".to_string()),
        }
    }

    #[test]
    fn flags_satisfy_resolution() {
        let config = full_settings().resolve().unwrap();
        assert_eq!(config.org_id, "org");
        assert_eq!(config.base_url, "https://altrnet.example.com");
    }

    #[test]
    fn missing_value_fails_fast() {
        // Scoped to a variable name no other test reads, since the
        // environment is process-global.
        let mut settings = full_settings();
        settings.secret = None;
        std::env::remove_var(ENV_SECRET);
        let err = settings.resolve().unwrap_err();
        assert!(err.to_string().contains(ENV_SECRET));
    }

    #[test]
    fn empty_flag_falls_through_to_env() {
        let mut settings = full_settings();
        settings.org_id = Some(String::new());
        std::env::set_var(ENV_ORG_ID, "from-env");
        let config = settings.resolve().unwrap();
        assert_eq!(config.org_id, "from-env");
        std::env::remove_var(ENV_ORG_ID);
    }
}
