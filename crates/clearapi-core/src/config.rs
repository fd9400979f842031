use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::synth::command::{CommandOptions, TOKEN_PLACEHOLDER};
use crate::synth::example::ExampleContext;

/// Top-level configuration loaded from `.clearapi.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClearApiConfig {
    pub input: String,
    pub command: CommandConfig,
    pub example: ExampleConfig,
    pub tree: TreeConfig,
}

impl Default for ClearApiConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            command: CommandConfig::default(),
            example: ExampleConfig::default(),
            tree: TreeConfig::default(),
        }
    }
}

/// Command building options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Base URL used instead of the document's first server.
    pub server: Option<String>,
    /// Text placed after `Bearer` in the `Authorization` header.
    pub token: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            server: None,
            token: TOKEN_PLACEHOLDER.to_string(),
        }
    }
}

impl CommandConfig {
    pub fn options(&self) -> CommandOptions {
        CommandOptions {
            token: self.token.clone(),
        }
    }
}

/// Example synthesis options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    pub context: ExampleContext,
}

/// Schema tree options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".clearapi.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ClearApiConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ClearApiConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# clearapi configuration
input: openapi.json

command:
  # server: https://api.example.com   # overrides the document's first server
  token: "<token>"

example:
  context: request      # request | response | neutral

tree:
  max_depth: 8
"#
}
