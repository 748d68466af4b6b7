use crate::{ServerSettings, ShardId};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Fully resolved launch parameters for one server process.
///
/// Built once per `start()` and owned by the resulting
/// [`crate::ProcessHandle`], so it cannot change while the process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub shard: ShardId,
    pub binary: PathBuf,
    pub host: String,
    /// `None` requests an OS-assigned port
    pub port: Option<u16>,
    pub shard_flag: String,
    pub data_dir_flag: String,
    pub port_flag: String,
    pub host_flag: Option<String>,
    pub extra_args: Vec<String>,
    pub extra_env: Vec<(String, String)>,
    pub data_root: Option<PathBuf>,
    pub keep_data_dir: bool,
}

impl LaunchConfig {
    pub fn new(shard: ShardId, binary: PathBuf, settings: &ServerSettings) -> Self {
        Self {
            shard,
            binary,
            host: settings.host.clone(),
            port: settings.port,
            shard_flag: settings.shard_flag.clone(),
            data_dir_flag: settings.data_dir_flag.clone(),
            port_flag: settings.port_flag.clone(),
            host_flag: settings.host_flag.clone(),
            extra_args: settings.extra_args.clone(),
            extra_env: settings
                .extra_env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            data_root: settings.data_root.clone(),
            keep_data_dir: settings.keep_data_dir,
        }
    }

    /// Command line for the server: extra arguments first, then
    /// `<shard> <data-dir> [<host>] <port>` flags. Port `0` asks the server
    /// to bind any free port.
    pub fn args(&self, data_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();

        args.push(OsString::from(&self.shard_flag));
        args.push(OsString::from(self.shard.as_str()));
        args.push(OsString::from(&self.data_dir_flag));
        args.push(data_dir.as_os_str().to_os_string());
        if let Some(ref host_flag) = self.host_flag {
            args.push(OsString::from(host_flag));
            args.push(OsString::from(&self.host));
        }
        args.push(OsString::from(&self.port_flag));
        args.push(OsString::from(self.port.unwrap_or(0).to_string()));

        args
    }
}
