use anyhow::Context;
use medassist_core::config::ClientConfig;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::default_client_config;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<ClientConfig> {
        let bytes =
            fs::read(&self.path).with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        Ok(cfg)
    }

    /// Missing file means defaults; a present but broken file is still an error.
    pub fn load_or_default(&self) -> anyhow::Result<ClientConfig> {
        if !self.path.exists() {
            log::info!("no config at {}, using defaults", self.path.display());
            return Ok(default_client_config());
        }
        self.load()
    }
}
