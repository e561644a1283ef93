use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

/// A file-lock passcode.
///
/// Never printed: `Debug` is redacted so passcodes stay out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Passcode(String);

impl Passcode {
    pub fn new(passcode: impl Into<String>) -> Self {
        Self(passcode.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passcode(<redacted>)")
    }
}

impl From<&str> for Passcode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Verified passcodes for the current session, keyed by file name.
///
/// Entries are only written after the backend accepted the passcode for that
/// exact file, and live in memory only.
#[derive(Default)]
pub struct PasscodeCache {
    entries: RwLock<HashMap<String, Passcode>>,
}

impl PasscodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<Passcode> {
        self.entries.read().get(file_name).cloned()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.read().contains_key(file_name)
    }

    /// Record a passcode the backend just accepted for `file_name`.
    pub fn remember(&self, file_name: &str, passcode: Passcode) {
        self.entries.write().insert(file_name.to_string(), passcode);
    }

    /// Remove the entry for `file_name` only if it still holds `stale`.
    ///
    /// Returns true if an entry was removed. A newer passcode verified by a
    /// concurrent operation is left in place.
    pub fn evict_if_matches(&self, file_name: &str, stale: &Passcode) -> bool {
        let mut entries = self.entries.write();
        match entries.get(file_name) {
            Some(current) if current == stale => {
                entries.remove(file_name);
                true
            }
            _ => false,
        }
    }

    pub fn forget(&self, file_name: &str) -> Option<Passcode> {
        self.entries.write().remove(file_name)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Names of the files with a remembered passcode, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for PasscodeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasscodeCache")
            .field("files", &self.file_names())
            .finish()
    }
}
