/*!
 * Bridge Configuration
 * Environment-driven settings for the tracing layer and the demo backend
 *
 * Environment variables:
 * - VFS_BRIDGE_TRACE_JSON: JSON log output (`1`/`true`/`yes` or `0`/`false`/`no`, default: false)
 * - VFS_BRIDGE_STORAGE_PATH: host directory to serve through LocalFS (default: unset, MemFS)
 * - VFS_BRIDGE_MEMFS_CAPACITY: byte limit for the in-memory backend (default: unlimited)
 */

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::vfs::{FileSystem, LocalFS, MemFS, VfsError, VfsResult};

pub const ENV_TRACE_JSON: &str = "VFS_BRIDGE_TRACE_JSON";
pub const ENV_STORAGE_PATH: &str = "VFS_BRIDGE_STORAGE_PATH";
pub const ENV_MEMFS_CAPACITY: &str = "VFS_BRIDGE_MEMFS_CAPACITY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub trace_json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memfs_capacity: Option<usize>,
}

impl BridgeConfig {
    /// Read configuration from the process environment
    ///
    /// Unset or empty variables keep their defaults. Values that do not parse
    /// are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = value(ENV_TRACE_JSON) {
            match parse_bool(&raw) {
                Some(flag) => config.trace_json = flag,
                None => warn!(key = ENV_TRACE_JSON, value = %raw, "ignoring unparseable boolean"),
            }
        }

        config.storage_path = value(ENV_STORAGE_PATH).map(PathBuf::from);

        if let Some(raw) = value(ENV_MEMFS_CAPACITY) {
            match raw.parse::<usize>() {
                Ok(bytes) => config.memfs_capacity = Some(bytes),
                Err(e) => warn!(
                    key = ENV_MEMFS_CAPACITY,
                    value = %raw,
                    error = %e,
                    "ignoring unparseable capacity"
                ),
            }
        }

        config
    }

    /// Build the backend this configuration selects
    ///
    /// A storage path selects LocalFS (the directory is created if missing);
    /// otherwise an in-memory store, capped when a capacity is set.
    pub fn backend(&self) -> VfsResult<Arc<dyn FileSystem>> {
        if let Some(path) = &self.storage_path {
            std::fs::create_dir_all(path)
                .map_err(|e| VfsError::from_io(e, path.display().to_string()))?;
            info!(storage_path = %path.display(), "using local backend");
            return Ok(Arc::new(LocalFS::new(path.clone())));
        }

        match self.memfs_capacity {
            Some(bytes) => {
                info!(capacity = bytes, "using in-memory backend");
                Ok(Arc::new(MemFS::with_capacity(bytes)))
            }
            None => {
                info!("using in-memory backend");
                Ok(Arc::new(MemFS::new()))
            }
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
