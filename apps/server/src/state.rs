use apprelay_application::StatusProcessor;
use apprelay_infrastructure::ConfigHandle;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub status_processor: StatusProcessor,
    pub config: ConfigHandle,
}
