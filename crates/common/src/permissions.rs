//! # File permissions
//!
//! Every file in the managed namespace carries a [`PermissionSet`]: four
//! independent capability bits plus a passcode lock.
//!
//! ## Defaults
//!
//! The backend omits capability bits it never stored. Absent bits are read as:
//! - `view`, `download`: allowed
//! - `edit`, `delete`: denied
//!
//! ## Roles
//!
//! An [`Role::Admin`] bypasses all four capability checks. The lock is not a
//! capability: a locked file still requires its passcode from an admin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Role of the acting user, as issued by the backend at login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid role: {0} (expected 'admin' or 'user')")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// An action a user may attempt on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    View,
    Edit,
    Delete,
    Download,
}

impl OperationKind {
    /// Whether an absent capability bit is read as allowed.
    pub fn permissive_by_default(&self) -> bool {
        matches!(self, OperationKind::View | OperationKind::Download)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::View => write!(f, "view"),
            OperationKind::Edit => write!(f, "edit"),
            OperationKind::Delete => write!(f, "delete"),
            OperationKind::Download => write!(f, "download"),
        }
    }
}

/// Capability bits and lock state for a single file.
///
/// The backend's `lock_hash` is never read into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_locked: bool,
    /// User id of the uploader, if the backend recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u64>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl PermissionSet {
    /// A set with all four capability bits stated explicitly.
    pub fn explicit(view: bool, download: bool, edit: bool, delete: bool) -> Self {
        Self {
            view: Some(view),
            download: Some(download),
            edit: Some(edit),
            delete: Some(delete),
            is_locked: false,
            owner: None,
        }
    }

    /// Used when the permission query fails and the caller opted to fail open:
    /// nothing stated, not locked.
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// The raw capability bit for `kind`, `None` if the backend omitted it.
    pub fn capability(&self, kind: OperationKind) -> Option<bool> {
        match kind {
            OperationKind::View => self.view,
            OperationKind::Edit => self.edit,
            OperationKind::Delete => self.delete,
            OperationKind::Download => self.download,
        }
    }

    /// Whether `role` may attempt `kind`. Says nothing about the lock.
    pub fn allows(&self, kind: OperationKind, role: Role) -> bool {
        if role.is_admin() {
            return true;
        }
        self.capability(kind)
            .unwrap_or_else(|| kind.permissive_by_default())
    }
}

/// A file as reported by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    /// Modification time, unix seconds
    pub modified: f64,
    #[serde(default)]
    pub permissions: PermissionSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [OperationKind; 4] = [
        OperationKind::View,
        OperationKind::Edit,
        OperationKind::Delete,
        OperationKind::Download,
    ];

    #[test]
    fn test_absent_bits_follow_defaults() {
        let perms = PermissionSet::default();
        assert!(perms.allows(OperationKind::View, Role::User));
        assert!(perms.allows(OperationKind::Download, Role::User));
        assert!(!perms.allows(OperationKind::Edit, Role::User));
        assert!(!perms.allows(OperationKind::Delete, Role::User));
    }

    #[test]
    fn test_explicit_bits_win_over_defaults() {
        let perms = PermissionSet::explicit(false, false, true, true);
        assert!(!perms.allows(OperationKind::View, Role::User));
        assert!(!perms.allows(OperationKind::Download, Role::User));
        assert!(perms.allows(OperationKind::Edit, Role::User));
        assert!(perms.allows(OperationKind::Delete, Role::User));
    }

    #[test]
    fn test_admin_bypasses_every_capability() {
        let perms = PermissionSet::explicit(false, false, false, false).locked();
        for kind in ALL_KINDS {
            assert!(perms.allows(kind, Role::Admin), "admin denied {}", kind);
        }
        // the lock is still there for the controller to enforce
        assert!(perms.is_locked);
    }

    #[test]
    fn test_deserialize_backend_entry() {
        let json = r#"{
            "view": true,
            "download": false,
            "edit": false,
            "delete": false,
            "owner": 7,
            "is_locked": true,
            "lock_hash": "pbkdf2:sha256:600000$abc$def"
        }"#;
        let perms: PermissionSet = serde_json::from_str(json).unwrap();
        assert_eq!(perms.view, Some(true));
        assert_eq!(perms.download, Some(false));
        assert_eq!(perms.owner, Some(7));
        assert!(perms.is_locked);
    }

    #[test]
    fn test_deserialize_sparse_entry() {
        let perms: PermissionSet =
            serde_json::from_str(r#"{"is_locked": null, "owner": null}"#).unwrap();
        assert_eq!(perms, PermissionSet::default());
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_file_descriptor_without_permissions() {
        let file: FileDescriptor =
            serde_json::from_str(r#"{"name": "a.txt", "size": 3, "modified": 1700000000.5}"#)
                .unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.permissions, PermissionSet::default());
    }
}
