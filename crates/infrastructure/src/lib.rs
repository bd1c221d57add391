//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_template_store;
mod http_client;
mod http_directory_lookup;
mod http_workflow_platform_client;
mod relay_config;
mod soap_envelope;
mod soap_submission_transport;

#[cfg(test)]
mod test_support;

pub use file_template_store::FileTemplateStore;
pub use http_client::build_http_client;
pub use http_directory_lookup::HttpDirectoryLookup;
pub use http_workflow_platform_client::HttpWorkflowPlatformClient;
pub use relay_config::{
    ConfigHandle, ConfigReloader, EndpointConfig, HttpConfig, LegacyConfig, RelayConfig,
    ServerConfig, SyncConfig, SystemConfig, TemplatesConfig,
};
pub use soap_envelope::{
    SOAP_ENVELOPE_NS, parse_registration_response, parse_status_callback,
    render_registration_request, render_status_response,
};
pub use soap_submission_transport::SoapSubmissionTransport;
