//! Evaluation context configuration file parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where the local-variable resolver sits in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalPlacement {
    /// Ahead of everything; local variables shadow namespaces.
    First,
    /// After the generic fallbacks; every other resolver gets first refusal.
    Last,
}

impl Default for LocalPlacement {
    fn default() -> Self {
        LocalPlacement::First
    }
}

/// Resolver selection and ordering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub local_variables: LocalPlacement,
    /// Register the `Class` namespace backed by the core class registry.
    pub class_namespace: bool,
    /// Register the `Color` namespace.
    pub color_namespace: bool,
    /// Build the map, list, array and record resolvers read-only.
    pub read_only_collections: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            local_variables: LocalPlacement::First,
            class_namespace: false,
            color_namespace: false,
            read_only_collections: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Prefix for the core functions. Empty means none are registered.
    pub core_prefix: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        FunctionConfig {
            core_prefix: "fn".to_string(),
        }
    }
}

/// Complete evaluation context configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub resolvers: ResolverConfig,
    pub functions: FunctionConfig,
}

impl ContextConfig {
    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [resolvers]
    /// local_variables = "last"
    /// class_namespace = true
    /// color_namespace = true
    /// read_only_collections = false
    ///
    /// [functions]
    /// core_prefix = "fn"
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
