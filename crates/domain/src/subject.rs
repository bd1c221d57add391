use apprelay_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of approval subjects the relay knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
    /// New virtual desktop.
    #[serde(rename = "approval.types.create-vd")]
    CreateDesktop,
    /// Reset of an existing virtual desktop.
    #[serde(rename = "approval.types.reset-vd")]
    ResetDesktop,
    /// Deletion of an existing virtual desktop.
    #[serde(rename = "approval.types.delete-vd")]
    DeleteDesktop,
    /// Access to the platform from an external network.
    #[serde(rename = "approval.types.access-from-external-network")]
    ExternalAccess,
}

impl SubjectType {
    /// Every supported subject type.
    pub const ALL: [Self; 4] = [
        Self::CreateDesktop,
        Self::ResetDesktop,
        Self::DeleteDesktop,
        Self::ExternalAccess,
    ];

    /// Returns the stable workflow platform tag.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::CreateDesktop => "approval.types.create-vd",
            Self::ResetDesktop => "approval.types.reset-vd",
            Self::DeleteDesktop => "approval.types.delete-vd",
            Self::ExternalAccess => "approval.types.access-from-external-network",
        }
    }

    /// Parses a workflow platform tag. Returns `None` for tags outside the closed set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_tag() == tag)
    }
}

/// Desktop description shared by reset, delete and owned-desktop rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopContents {
    /// Desktop name.
    pub vd_name: String,
    /// Disk size in GB.
    pub disk: u64,
    /// Desktop group name.
    pub vd_group_name: String,
    /// Creation timestamp as published.
    pub create_date: String,
    /// Operating system.
    pub os: String,
    /// Image version.
    #[serde(default)]
    pub version: Option<String>,
    /// Flavor name.
    pub flavor_name: String,
    /// Virtual CPU count.
    #[serde(default)]
    pub cpus: Option<u64>,
    /// Memory in MB.
    #[serde(default)]
    pub ram: Option<u64>,
}

/// Payload of a desktop creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesktopContents {
    /// Requested flavor name.
    pub flavor_name: String,
    /// Requested desktop group name.
    pub vd_group_name: String,
    /// Desktops the target user already owns.
    #[serde(default)]
    pub own_desktop: Vec<DesktopContents>,
    /// Expiration date of the new desktop.
    pub expiration_date: String,
    /// Requested disk size in GB.
    pub disk: u64,
    /// Requested virtual CPU count.
    #[serde(default)]
    pub cpus: Option<u64>,
    /// Requested memory in MB.
    #[serde(default)]
    pub ram: Option<u64>,
}

/// Payload of an external network access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAccessContents {
    /// Target user identifier.
    #[serde(default)]
    pub user_id: String,
    /// Target user display name.
    #[serde(default)]
    pub user_name: String,
    /// Target user organization.
    #[serde(default)]
    pub organization: String,
    /// Requester identifier.
    #[serde(default)]
    pub applicant: String,
    /// Requester display name.
    #[serde(default)]
    pub applicant_name: String,
    /// Access window start.
    pub start_date: String,
    /// Access window end.
    pub end_date: String,
    /// Requested network scope.
    #[serde(default)]
    pub network_scope: String,
    /// Requester-supplied reason.
    #[serde(default)]
    pub reason: String,
}

/// Subject-type specific payload, one variant per [`SubjectType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalSubject {
    /// Desktop creation.
    CreateDesktop(CreateDesktopContents),
    /// Desktop reset.
    ResetDesktop(DesktopContents),
    /// Desktop deletion.
    DeleteDesktop(DesktopContents),
    /// External network access.
    ExternalAccess(ExternalAccessContents),
}

impl ApprovalSubject {
    /// Interprets a raw payload according to its subject type.
    pub fn parse(subject_type: SubjectType, contents: &Value) -> AppResult<Self> {
        let parsed = match subject_type {
            SubjectType::CreateDesktop => decode(contents).map(Self::CreateDesktop),
            SubjectType::ResetDesktop => decode(contents).map(Self::ResetDesktop),
            SubjectType::DeleteDesktop => decode(contents).map(Self::DeleteDesktop),
            SubjectType::ExternalAccess => decode(contents).map(Self::ExternalAccess),
        };

        parsed.map_err(|error| {
            AppError::Validation(format!(
                "invalid contents for '{}': {error}",
                subject_type.as_tag()
            ))
        })
    }
}

fn decode<T: for<'de> Deserialize<'de>>(contents: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(contents)
}
