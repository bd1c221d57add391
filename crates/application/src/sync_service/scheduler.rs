use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::relay_ports::SettingsProvider;

use super::SyncCycleService;

/// Repeats sync cycles until cancelled.
///
/// Each cycle reads a fresh settings snapshot, and the sleep after it reads the
/// interval again. Cycles never overlap.
pub struct SyncScheduler {
    service: SyncCycleService,
    settings: Arc<dyn SettingsProvider>,
}

impl SyncScheduler {
    /// Creates a scheduler for `service`.
    #[must_use]
    pub fn new(service: SyncCycleService, settings: Arc<dyn SettingsProvider>) -> Self {
        Self { service, settings }
    }

    /// Runs cycles until `cancel` fires. An in-flight cycle is always finished.
    pub async fn run(&self, cancel: CancellationToken) {
        info!("approval sync scheduler started");

        loop {
            let settings = self.settings.deployment_settings();

            if let Err(error) = self.service.run_cycle(&settings).await {
                error!(error = %error, "approval sync cycle failed");
            }

            let minutes = self.settings.deployment_settings().sync_cycle_minutes;
            let pause = Duration::from_secs(u64::from(minutes) * 60);
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(pause) => {}
            }
        }

        info!("approval sync scheduler stopped");
    }
}
