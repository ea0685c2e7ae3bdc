//! Engine configuration

use pln_atomspace::AtomType;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::variable::DEFAULT_VARIABLE_PREFIX;

/// Configuration for the [`RuleApplicabilityEngine`](crate::RuleApplicabilityEngine).
///
/// Missing keys in a serialized configuration fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on premises per partition
    pub max_premises: usize,

    /// Largest power set the engine may enumerate for one output pattern
    pub max_enumerated_subsets: usize,

    /// Name prefix of auto-generated variables
    pub variable_prefix: String,

    /// Types reported as unprovable on top of the built-in ones
    pub extra_unprovable_types: Vec<AtomType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_premises: 4,
            max_enumerated_subsets: 65_536,
            variable_prefix: DEFAULT_VARIABLE_PREFIX.to_string(),
            extra_unprovable_types: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Small partitions only, for latency-sensitive callers
    pub fn conservative() -> Self {
        Self {
            max_premises: 2,
            max_enumerated_subsets: 1_024,
            ..Self::default()
        }
    }

    /// Wide partitions, for offline or batch reasoning
    pub fn exhaustive() -> Self {
        Self {
            max_premises: 8,
            max_enumerated_subsets: 1 << 20,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_premises == 0 {
            return Err(Error::InvalidConfig(
                "max_premises must be at least 1".to_string(),
            ));
        }
        if self.max_enumerated_subsets == 0 {
            return Err(Error::InvalidConfig(
                "max_enumerated_subsets must be at least 1".to_string(),
            ));
        }
        if self.variable_prefix.is_empty() {
            return Err(Error::InvalidConfig(
                "variable_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_premises, 4);
        assert_eq!(config.variable_prefix, "$pln_var_");
    }

    #[test]
    fn test_presets() {
        let conservative = EngineConfig::conservative();
        let exhaustive = EngineConfig::exhaustive();
        assert!(conservative.validate().is_ok());
        assert!(exhaustive.validate().is_ok());
        assert!(conservative.max_premises < exhaustive.max_premises);
        assert!(conservative.max_enumerated_subsets < exhaustive.max_enumerated_subsets);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = EngineConfig::default();
        config.max_premises = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EngineConfig {
            variable_prefix: String::new(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig {
            extra_unprovable_types: vec![AtomType::EvaluationLink],
            ..EngineConfig::exhaustive()
        };
        let json = config.to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = EngineConfig::from_json(r#"{ "max_premises": 3 }"#).unwrap();
        assert_eq!(config.max_premises, 3);
        assert_eq!(config.max_enumerated_subsets, 65_536);
        assert!(config.extra_unprovable_types.is_empty());
    }

    #[test]
    fn test_from_json_validates() {
        let err = EngineConfig::from_json(r#"{ "max_enumerated_subsets": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "max_premises": 2, "extra_unprovable_types": ["InheritanceLink"] }}"#
        )
        .unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_premises, 2);
        assert_eq!(config.extra_unprovable_types, vec![AtomType::InheritanceLink]);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
