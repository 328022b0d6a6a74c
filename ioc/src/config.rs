//! Container tuning loaded from YAML.

use crate::error::{ContainerError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

const DEFAULT_MAX_BUILD_DEPTH: usize = 256;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
  /// How many nested resolutions may be in flight before construction is
  /// considered unbounded and aborted.
  pub max_build_depth: usize,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      max_build_depth: DEFAULT_MAX_BUILD_DEPTH,
    }
  }
}

impl ContainerConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    let config: ContainerConfig =
      serde_yaml::from_str(source).map_err(|e| ContainerError::ConfigParse(e.to_string()))?;
    config.validate()
  }

  pub fn from_path(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);
    let config: ContainerConfig =
      serde_yaml::from_reader(reader).map_err(|e| ContainerError::ConfigParse(e.to_string()))?;
    config.validate()
  }

  fn validate(self) -> Result<Self> {
    if self.max_build_depth == 0 {
      return Err(ContainerError::InvalidConfigValue {
        field: "max_build_depth".to_string(),
        message: "must be at least 1".to_string(),
      });
    }
    Ok(self)
  }
}
