use std::path::Path;

use crate::relay_config::{ConfigHandle, RelayConfig};

pub(crate) fn sample_yaml(base_url: &str, template_dir: &Path) -> String {
    format!(
        r#"
system:
  system_id: BMIL
  form_id: FORM-VDI
server:
  port: 8088
  wsdl_path: ./wsdl/approval_status.wsdl
sync:
  cycle_minutes: 5
workflow_platform:
  base_url: {base_url}
directory:
  base_url: {base_url}/
legacy:
  register_endpoint: {base_url}/legacy/register
  namespace: http://legacy.example.com/approval
  username: relay
  password: secret
  soap_action: http://sap.com/xi/WebService/soap1.1
templates:
  directory: {}
  reset_desktop: Reset.html
"#,
        template_dir.display()
    )
}

pub(crate) fn sample_handle(base_url: &str, template_dir: &Path) -> ConfigHandle {
    let config = RelayConfig::from_yaml_str(&sample_yaml(base_url, template_dir))
        .unwrap_or_else(|error| panic!("sample config must be valid: {error}"));
    ConfigHandle::new(config)
}
