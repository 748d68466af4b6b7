use crate::config::{
    default_data_dir_flag, default_host, default_host_flag, default_port_flag, default_shard_flag,
};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server executable. `None` searches `DS_SERVER_BINARY`, the directory
    /// of the current executable and `PATH`.
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Host the server binds to and the probe connects to
    #[serde(default = "default_host")]
    pub host: String,

    /// Fixed port; `None` lets the OS assign one
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default = "default_shard_flag")]
    pub shard_flag: String,

    #[serde(default = "default_data_dir_flag")]
    pub data_dir_flag: String,

    #[serde(default = "default_port_flag")]
    pub port_flag: String,

    /// Flag carrying the bind host; `None` omits it
    #[serde(default = "default_host_flag")]
    pub host_flag: Option<String>,

    /// Arguments placed before the derived flags
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Additional environment for the child process
    #[serde(default)]
    pub extra_env: BTreeMap<String, String>,

    /// Parent directory for shard data directories (system temp dir if unset)
    #[serde(default)]
    pub data_root: Option<PathBuf>,

    /// Leave the data directory on disk after teardown
    #[serde(default)]
    pub keep_data_dir: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            binary: None,
            host: default_host(),
            port: None,
            shard_flag: default_shard_flag(),
            data_dir_flag: default_data_dir_flag(),
            port_flag: default_port_flag(),
            host_flag: default_host_flag(),
            extra_args: Vec::new(),
            extra_env: BTreeMap::new(),
            data_root: None,
            keep_data_dir: false,
        }
    }
}
