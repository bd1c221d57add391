use std::path::PathBuf;
use std::time::Duration;

use apprelay_core::AppResult;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{ConfigHandle, RelayConfig};

/// Periodically re-reads the deployment file and publishes valid snapshots.
///
/// An unreadable or invalid file keeps the previous snapshot.
pub struct ConfigReloader {
    path: PathBuf,
    interval: Duration,
    handle: ConfigHandle,
}

impl ConfigReloader {
    /// Creates a reloader for the file at `path`.
    #[must_use]
    pub fn new(path: PathBuf, interval: Duration, handle: ConfigHandle) -> Self {
        Self {
            path,
            interval,
            handle,
        }
    }

    /// Reloads once. Returns `true` when the published snapshot changed.
    pub async fn reload(&self) -> AppResult<bool> {
        let config = RelayConfig::load(&self.path).await?;
        if *self.handle.current() == config {
            return Ok(false);
        }
        self.handle.publish(config);
        Ok(true)
    }

    /// Reloads on every interval tick until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }

            match self.reload().await {
                Ok(true) => info!(path = %self.path.display(), "relay config reloaded"),
                Ok(false) => {}
                Err(error) => warn!(
                    path = %self.path.display(),
                    error = %error,
                    "failed to reload relay config, keeping previous snapshot"
                ),
            }
        }
    }
}
