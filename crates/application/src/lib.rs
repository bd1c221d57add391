//! Application services and ports.

#![forbid(unsafe_code)]

mod content_renderer;
mod relay_ports;
mod request_builder;
mod status_processor;
mod sync_service;

#[cfg(test)]
mod test_fakes;

pub use content_renderer::{ContentRenderer, LINE_SEPARATOR, RenderError};
pub use relay_ports::{
    DeploymentSettings, DirectoryLookup, SettingsProvider, SubmissionTransport, TemplateStore,
    WorkflowPlatformClient,
};
pub use request_builder::{RequestBuilder, SubmissionBuildError};
pub use status_processor::{CallbackError, StatusProcessor};
pub use sync_service::{DroppedApproval, SyncCycleReport, SyncCycleService, SyncScheduler};
