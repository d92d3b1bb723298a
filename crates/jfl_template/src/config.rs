//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};

/// How attribute names are embedded into the placeholder pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Pattern metacharacters in names match literally.
    #[default]
    Escaped,
    /// Names are embedded raw, so `a.c` also matches `{abc}`.
    Legacy,
}

/// What happens to a placeholder whose attribute value is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Leave the token text in place.
    #[default]
    KeepToken,
    /// Replace the token with the empty string.
    Empty,
}

/// Interpolation engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub name_matching: NameMatching,
    pub null_policy: NullPolicy,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw name embedding and empty substitution for absent values.
    pub fn legacy() -> Self {
        Self {
            name_matching: NameMatching::Legacy,
            null_policy: NullPolicy::Empty,
        }
    }

    pub fn with_name_matching(mut self, matching: NameMatching) -> Self {
        self.name_matching = matching;
        self
    }

    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    pub fn from_yaml_str(content: &str) -> TemplateResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> TemplateResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a `.yaml`, `.yml` or `.toml` file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&fs::read_to_string(path)?),
            _ => Err(TemplateError::Config(format!(
                "unsupported config file format: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.name_matching, NameMatching::Escaped);
        assert_eq!(config.null_policy, NullPolicy::KeepToken);
    }

    #[test]
    fn test_yaml_partial() {
        let config = EngineConfig::from_yaml_str("name_matching: legacy\n").unwrap();
        assert_eq!(config.name_matching, NameMatching::Legacy);
        assert_eq!(config.null_policy, NullPolicy::KeepToken);
    }

    #[test]
    fn test_toml() {
        let config = EngineConfig::from_toml_str("null_policy = \"empty\"\n").unwrap();
        assert_eq!(config, EngineConfig::new().with_null_policy(NullPolicy::Empty));
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(matches!(
            EngineConfig::from_yaml_str("null_policy: drop\n"),
            Err(TemplateError::Yaml(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            EngineConfig::from_file(Path::new("engine.ini")),
            Err(TemplateError::Config(_))
        ));
    }
}
