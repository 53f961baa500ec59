use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::scope::Namespace;

/// Settings applied when building an [`Actions`](crate::Actions) host.
///
/// ```toml
/// namespace = "application"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionsConfig {
    /// Namespace prepended to every label; absent or empty means none.
    pub namespace: Option<String>,
}

impl ActionsConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys, or a namespace containing `/`
    /// or whitespace.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw).context("parsing actions config")?;
        config.normalize()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading actions config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("loading {}", path.display()))
    }

    /// Namespace described by this configuration.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace::from(self.namespace.clone())
    }

    fn normalize(&mut self) -> Result<()> {
        if let Some(namespace) = self.namespace.take() {
            let trimmed = namespace.trim();
            if trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
                bail!("invalid namespace {trimmed:?}: must not contain '/' or whitespace");
            }
            if !trimmed.is_empty() {
                self.namespace = Some(trimmed.to_string());
            }
        }
        Ok(())
    }
}
