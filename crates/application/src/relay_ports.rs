mod directory;
mod settings;
mod submission;
mod templates;
mod workflow_platform;

pub use directory::DirectoryLookup;
pub use settings::{DeploymentSettings, SettingsProvider};
pub use submission::SubmissionTransport;
pub use templates::TemplateStore;
pub use workflow_platform::WorkflowPlatformClient;
