use apprelay_core::NonEmptyString;

/// Deployment identity and scheduling values read at the start of each cycle or request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSettings {
    /// Destination-system identifier of this deployment.
    pub system_id: NonEmptyString,
    /// Legacy form identifier used for drafts.
    pub form_id: NonEmptyString,
    /// Sync interval and discovery window, in minutes.
    pub sync_cycle_minutes: u32,
}

/// Capability returning the current configuration snapshot.
///
/// Implementations are refreshed externally; callers must not cache the
/// returned value across cycles or requests.
pub trait SettingsProvider: Send + Sync {
    /// Returns the current deployment settings.
    fn deployment_settings(&self) -> DeploymentSettings;
}
