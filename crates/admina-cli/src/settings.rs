//! Connection settings: an optional config file overlaid by `ADMINA_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use admina_client::{ClientConfig, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Shape of the config file and of the `ADMINA_*` variables.
#[derive(Deserialize)]
pub struct Settings {
  pub base_url:        String,
  #[serde(default)]
  pub organization_id: String,
  #[serde(default)]
  pub api_key:         String,
  /// Root for `out/data`; the working directory when unset.
  pub cli_root:        Option<PathBuf>,
  pub timeout_secs:    u64,
}

impl Settings {
  /// Read `file` (when given) and the environment. Environment wins.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("base_url", DEFAULT_BASE_URL)?
      .set_default("timeout_secs", 30)?;
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path));
    }
    builder
      .add_source(config::Environment::with_prefix("ADMINA"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url:        self.base_url.clone(),
      organization_id: self.organization_id.clone(),
      api_key:         self.api_key.clone(),
      timeout:         Duration::from_secs(self.timeout_secs),
    }
  }

  /// Directory for CSV artifacts: `explicit` if given, else
  /// `<cli_root or cwd>/out/data`.
  pub fn out_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
      return Ok(dir);
    }
    let root = match &self.cli_root {
      Some(root) if !root.as_os_str().is_empty() => root.clone(),
      _ => std::env::current_dir().context("failed to get working directory")?,
    };
    Ok(root.join("out").join("data"))
  }
}
