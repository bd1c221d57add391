use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Organizational identity record resolved from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Internal directory identifier. Compared case-insensitively.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Enterprise employee code used by the legacy approval system.
    pub employee_code: Option<String>,
    /// Department identifier, when published.
    pub department_id: Option<String>,
    /// Email address, when published.
    pub email_address: Option<String>,
}

impl DirectoryUser {
    /// Returns the employee code when present and not blank.
    #[must_use]
    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Case-insensitive index over one batch of directory users.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, DirectoryUser>,
}

impl UserDirectory {
    /// Indexes users by lowercased identifier. Later duplicates win.
    #[must_use]
    pub fn from_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (identifier_key(&user.id), user))
            .collect();
        Self { users }
    }

    /// Finds one user by identifier, ignoring case.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DirectoryUser> {
        self.users.get(&identifier_key(id))
    }
}

pub(crate) fn identifier_key(id: &str) -> String {
    id.trim().to_lowercase()
}

pub(crate) fn same_identifier(left: &str, right: &str) -> bool {
    identifier_key(left) == identifier_key(right)
}
