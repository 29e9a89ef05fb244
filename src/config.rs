use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Server configuration.
///
/// Loaded from an optional YAML file named by `CONFIG`, then overridden by
/// the `LISTEN` and `ROOT` environment variables.
///
/// ```yaml
/// listen_addr: "0.0.0.0:8000"
/// root: /srv/share
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Directory every request path is resolved against
    pub root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var("CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Applies `LISTEN` and `ROOT` from `lookup` over the current values.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(root) = lookup("ROOT") {
            self.root = PathBuf::from(root);
        }
        self
    }
}
