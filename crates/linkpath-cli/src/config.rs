use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use linkpath_resolve::ResolverConfig;
use linkpath_server::ServerConfig;

/// Settings read from `--config <file.toml>`. Command line flags win.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL objects are fetched from.
    pub server: Option<String>,
    /// Base URL schemas are fetched from. Defaults to `<server>/_schemas`.
    pub schemas: Option<String>,
    /// Local data root with `objects/` and `schemas/`; used instead of HTTP.
    pub data: Option<PathBuf>,
    pub resolver: ResolverConfig,
    pub serve: ServerConfig,
}

impl CliConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.resolver.max_fan_out, 8);
    }

    #[test]
    fn nested_tables() {
        let config = CliConfig::from_toml_str(
            r#"
            server = "http://localhost:8700"

            [resolver]
            max_fan_out = 2

            [serve]
            data_root = "/srv/linkpath"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.as_deref(), Some("http://localhost:8700"));
        assert_eq!(config.resolver.max_fan_out, 2);
        assert_eq!(config.resolver.fetch_timeout_secs, 30);
        assert_eq!(config.serve.data_root, PathBuf::from("/srv/linkpath"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
