use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `objects/*.json` and `schemas/<Type>.json`.
    pub data_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8700)),
            data_root: PathBuf::from("data"),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_root.join("objects")
    }

    pub fn schemas_dir(&self) -> PathBuf {
        self.data_root.join("schemas")
    }

    pub fn with_data_root(mut self, data_root: impl AsRef<Path>) -> Self {
        self.data_root = data_root.as_ref().to_path_buf();
        self
    }
}
