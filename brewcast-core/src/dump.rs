//! Best-effort dumps of raw upstream responses for later inspection.

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{config::DebugDumpConfig, error::BrewcastError};

#[derive(Debug, Clone, Default)]
pub struct DebugDump {
    dir: Option<PathBuf>,
}

impl DebugDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }

    /// A dump that never writes anything.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn from_config(config: &DebugDumpConfig) -> Self {
        if config.enabled { Self::new(&config.dir) } else { Self::disabled() }
    }

    /// Write `body` to `<dir>/<file_name>` in the background.
    ///
    /// Failures are logged, never returned. The handle is only useful to tests
    /// that want to wait for the write. Must be called from inside a tokio runtime.
    pub fn save(&self, file_name: &str, body: String) -> Option<JoinHandle<()>> {
        let path = self.dir.as_ref()?.join(file_name);

        Some(tokio::spawn(async move {
            match write_dump(&path, body.as_bytes()).await {
                Ok(()) => debug!("Saved debug dump to {}", path.display()),
                Err(e) => warn!("{e}"),
            }
        }))
    }
}

async fn write_dump(path: &Path, bytes: &[u8]) -> Result<(), BrewcastError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BrewcastError::file_write(parent, e))?;
    }
    tokio::fs::write(path, bytes).await.map_err(|e| BrewcastError::file_write(path, e))
}
