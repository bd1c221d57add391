//! Deployment configuration loaded from a YAML file.
//!
//! The file is validated on every load. A snapshot is published through a
//! `tokio::sync::watch` channel and read fresh by every cycle, request and
//! adapter call.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use apprelay_application::{DeploymentSettings, SettingsProvider};
use apprelay_core::{AppError, AppResult, NonEmptyString};
use apprelay_domain::SubjectType;
use serde::Deserialize;
use tokio::sync::watch;
use url::Url;

mod reloader;

pub use reloader::ConfigReloader;

const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Root of the deployment file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayConfig {
    /// Deployment identity.
    pub system: SystemConfig,
    /// Inbound callback listener.
    pub server: ServerConfig,
    /// Sync scheduling.
    pub sync: SyncConfig,
    /// Workflow platform REST endpoint.
    pub workflow_platform: EndpointConfig,
    /// Organizational directory REST endpoint.
    pub directory: EndpointConfig,
    /// Legacy approval system SOAP endpoint.
    pub legacy: LegacyConfig,
    /// Content template files.
    pub templates: TemplatesConfig,
    /// Outbound HTTP client options.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Deployment identity sent with every draft and checked on every callback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Destination-system identifier.
    pub system_id: NonEmptyString,
    /// Legacy form identifier.
    pub form_id: NonEmptyString,
}

/// Inbound listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Path of the WSDL document served on `?wsdl`.
    pub wsdl_path: PathBuf,
    /// Namespace of the status callback reply element.
    #[serde(default = "default_status_namespace")]
    pub namespace: String,
}

/// Sync scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// Cycle interval and discovery window, in minutes.
    pub cycle_minutes: u32,
}

/// Base URL of a REST collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointConfig {
    /// Scheme, host and optional port, e.g. `http://vsmgmt:8080`.
    pub base_url: String,
}

impl EndpointConfig {
    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> AppResult<Url> {
        let joined = format!("{}{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&joined).map_err(|error| {
            AppError::Internal(format!("invalid endpoint url '{joined}': {error}"))
        })
    }
}

/// Legacy SOAP endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyConfig {
    /// Draft registration endpoint.
    pub register_endpoint: String,
    /// Namespace of the registration message.
    pub namespace: String,
    /// HTTP basic auth user.
    #[serde(default)]
    pub username: Option<String>,
    /// HTTP basic auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Optional `SOAPAction` header value.
    #[serde(default)]
    pub soap_action: Option<String>,
}

/// Template file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding the template files.
    pub directory: PathBuf,
    /// Desktop creation template file name.
    #[serde(default)]
    pub create_desktop: Option<String>,
    /// Desktop deletion template file name.
    #[serde(default)]
    pub delete_desktop: Option<String>,
    /// Desktop reset template file name.
    #[serde(default)]
    pub reset_desktop: Option<String>,
    /// External access template file name.
    #[serde(default)]
    pub external_access: Option<String>,
}

impl TemplatesConfig {
    /// Returns the template path for one subject type.
    #[must_use]
    pub fn path_for(&self, subject_type: SubjectType) -> PathBuf {
        let (configured, default) = match subject_type {
            SubjectType::CreateDesktop => (&self.create_desktop, "DesktopCreate.html"),
            SubjectType::DeleteDesktop => (&self.delete_desktop, "DesktopDelete.html"),
            SubjectType::ResetDesktop => (&self.reset_desktop, "DesktopReset.html"),
            SubjectType::ExternalAccess => (&self.external_access, "ExternalAccess.html"),
        };
        self.directory.join(configured.as_deref().unwrap_or(default))
    }
}

/// Outbound HTTP client options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HttpConfig {
    /// Returns the timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_status_namespace() -> String {
    "urn:approval-status".to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RelayConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(source: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(source)
            .map_err(|error| AppError::Validation(format!("invalid relay config: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let source = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::from_yaml_str(&source)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> AppResult<()> {
        if self.sync.cycle_minutes == 0 {
            return Err(AppError::Validation(
                "sync.cycle_minutes must be greater than zero".to_owned(),
            ));
        }
        if self.http.timeout_ms == 0 {
            return Err(AppError::Validation(
                "http.timeout_ms must be greater than zero".to_owned(),
            ));
        }
        if self.legacy.namespace.trim().is_empty() {
            return Err(AppError::Validation(
                "legacy.namespace must not be empty".to_owned(),
            ));
        }

        for (name, value) in [
            ("workflow_platform.base_url", &self.workflow_platform.base_url),
            ("directory.base_url", &self.directory.base_url),
            ("legacy.register_endpoint", &self.legacy.register_endpoint),
        ] {
            Url::parse(value)
                .map_err(|error| AppError::Validation(format!("{name} is not a url: {error}")))?;
        }

        Ok(())
    }

    /// Returns the values the application layer consumes.
    #[must_use]
    pub fn deployment_settings(&self) -> DeploymentSettings {
        DeploymentSettings {
            system_id: self.system.system_id.clone(),
            form_id: self.system.form_id.clone(),
            sync_cycle_minutes: self.sync.cycle_minutes,
        }
    }
}

/// Shared handle to the current configuration snapshot.
#[derive(Clone)]
pub struct ConfigHandle {
    sender: Arc<watch::Sender<Arc<RelayConfig>>>,
}

impl ConfigHandle {
    /// Creates a handle publishing `initial`.
    #[must_use]
    pub fn new(initial: RelayConfig) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<RelayConfig> {
        self.sender.borrow().clone()
    }

    /// Replaces the snapshot seen by every reader.
    pub fn publish(&self, config: RelayConfig) {
        self.sender.send_replace(Arc::new(config));
    }
}

impl SettingsProvider for ConfigHandle {
    fn deployment_settings(&self) -> DeploymentSettings {
        self.current().deployment_settings()
    }
}
