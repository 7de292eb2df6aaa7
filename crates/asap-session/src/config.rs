//! Session configuration, loaded from TOML.
//!
//! ```toml
//! effect_inference = true
//! simplify_constraints = true
//! report_non_minimal = false
//! constraint_prefix = "esi"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Defer failed RPL inclusions to the solver and give functions declared
    /// without an annotation a summary variable.
    pub effect_inference: bool,
    /// Reduce every effect-inclusion constraint to a minimal LHS before export.
    pub simplify_constraints: bool,
    /// Report covered effects found by minimality checking.
    pub report_non_minimal: bool,
    /// Prefix of generated constraint ids.
    pub constraint_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            effect_inference: false,
            simplify_constraints: true,
            report_non_minimal: true,
            constraint_prefix: "c".to_string(),
        }
    }
}

impl SessionConfig {
    /// Configuration for effect-inference runs.
    pub fn inference() -> Self {
        Self {
            effect_inference: true,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!(!config.effect_inference);
        assert_eq!(config.constraint_prefix, "c");
    }

    #[test]
    fn test_partial_config() {
        let config = SessionConfig::from_toml_str(
            r#"
effect_inference = true
constraint_prefix = "esi"
"#,
        )
        .unwrap();
        assert!(config.effect_inference);
        assert!(config.simplify_constraints);
        assert_eq!(config.constraint_prefix, "esi");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = SessionConfig::from_toml_str("infer = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = SessionConfig::inference();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SessionConfig::from_toml_str(&text).unwrap(), config);
    }
}
