//! Front-end configuration files

use anyhow::{Context as _, Result};
use cx_instantiate::InstantiationLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Front-end settings (e.g., `cxfront.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Template instantiation
    #[serde(default)]
    pub instantiation: InstantiationConfig,

    /// Diagnostic rendering
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Template instantiation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiationConfig {
    /// Instantiations that may be in progress at once
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for InstantiationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> u32 {
    InstantiationLimits::default().max_depth
}

/// Diagnostic settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Render the offending construct into messages
    #[serde(default = "default_print_context")]
    pub print_context: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            print_context: default_print_context(),
        }
    }
}

fn default_print_context() -> bool {
    true
}

impl FrontendConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse front-end configuration")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    /// Limits handed to the instantiation session
    pub fn limits(&self) -> InstantiationLimits {
        InstantiationLimits {
            max_depth: self.instantiation.max_depth,
        }
    }
}
