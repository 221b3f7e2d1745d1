use std::path::PathBuf;

use lpp_scoring::{PolicyError, PolicyTable};
use serde::Deserialize;

/// Deployment environment, read from `ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server configuration loaded from environment variables.
///
/// | Variable          | Default                 |
/// |-------------------|-------------------------|
/// | `HOST`            | `0.0.0.0`               |
/// | `PORT`            | `3000`                  |
/// | `ENV`             | `development`           |
/// | `ALLOWED_ORIGINS` | `http://localhost:8080` |
/// | `POLICY_FILE`     | unset (built-in presets)|
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    /// Comma-separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// JSON file overriding the built-in scoring policies
    #[serde(default)]
    pub policy_file: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8080".to_string()]
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Built-in policy table, with `POLICY_FILE` applied on top when set.
    pub fn load_policies(&self) -> Result<PolicyTable, PolicyError> {
        match &self.policy_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading scoring policies");
                PolicyTable::from_path(path)
            }
            None => Ok(PolicyTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> ApiConfig {
        envy::from_iter(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.allowed_origins, vec!["http://localhost:8080"]);
        assert!(config.policy_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("ENV", "production"),
            ("ALLOWED_ORIGINS", "https://a.example,https://b.example"),
            ("POLICY_FILE", "/etc/lpp/policies.json"),
        ]);
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
        assert!(config.env.is_production());
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.policy_file,
            Some(PathBuf::from("/etc/lpp/policies.json"))
        );
    }

    #[test]
    fn test_invalid_port() {
        let result: Result<ApiConfig, _> =
            envy::from_iter([("PORT".to_string(), "not-a-port".to_string())]);
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_policies_without_file() {
        let config = from_pairs(&[]);
        assert_eq!(config.load_policies().unwrap(), PolicyTable::builtin());
    }
}
