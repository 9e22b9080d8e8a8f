//! Durable key/value backends for session entries
//!
//! Entries are plain strings under fixed keys. Backends perform no
//! validation; they only keep what they are given.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::SessionError;

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the principal's role
pub const ROLE_KEY: &str = "userType";
/// Key holding the principal's subject identifier
pub const SUBJECT_KEY: &str = "userId";

pub type Entries = BTreeMap<String, String>;

/// Storage backend for session entries.
///
/// Every method is atomic with respect to the others on the same backend.
pub trait SessionStorage: Send + Sync {
    /// Read all entries
    fn load(&self) -> Result<Entries, SessionError>;

    /// Insert or overwrite the given entries in one operation
    fn store(&self, entries: &[(&str, &str)]) -> Result<(), SessionError>;

    /// Remove the given keys; absent keys are not an error
    fn remove(&self, keys: &[&str]) -> Result<(), SessionError>;

    /// Remove the given keys only if `condition` holds for the current
    /// entries, checked and applied in one operation. Returns whether the
    /// keys were removed.
    fn remove_if(
        &self,
        keys: &[&str],
        condition: &dyn Fn(&Entries) -> bool,
    ) -> Result<bool, SessionError>;
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<Entries>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Entries, SessionError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SessionError::Storage("memory storage lock poisoned".to_string()))?;
        Ok(entries.clone())
    }

    fn store(&self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        let mut current = self
            .entries
            .write()
            .map_err(|_| SessionError::Storage("memory storage lock poisoned".to_string()))?;
        for (key, value) in entries {
            current.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> Result<(), SessionError> {
        let mut current = self
            .entries
            .write()
            .map_err(|_| SessionError::Storage("memory storage lock poisoned".to_string()))?;
        for key in keys {
            current.remove(*key);
        }
        Ok(())
    }

    fn remove_if(
        &self,
        keys: &[&str],
        condition: &dyn Fn(&Entries) -> bool,
    ) -> Result<bool, SessionError> {
        let mut current = self
            .entries
            .write()
            .map_err(|_| SessionError::Storage("memory storage lock poisoned".to_string()))?;
        if !condition(&current) {
            return Ok(false);
        }
        for key in keys {
            current.remove(*key);
        }
        Ok(true)
    }
}

/// JSON file storage that survives process restarts.
///
/// The file holds a flat object of string entries and is created with
/// owner-only permissions on Unix. Writes go to a sibling temp file that is
/// renamed over the target.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Storage(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse(&self, contents: &str) -> Result<Entries, SessionError> {
        serde_json::from_str(contents).map_err(|e| {
            SessionError::Storage(format!("corrupted {}: {}", self.path.display(), e))
        })
    }

    fn read_entries(&self) -> Result<Entries, SessionError> {
        match self.read_raw()? {
            Some(contents) => self.parse(&contents),
            None => Ok(Entries::new()),
        }
    }

    /// Entries to build a write on; a corrupted file is discarded
    fn read_entries_for_write(&self) -> Result<Entries, SessionError> {
        let Some(contents) = self.read_raw()? else {
            return Ok(Entries::new());
        };

        self.parse(&contents).or_else(|e| {
            tracing::warn!(error = %e, "Discarding corrupted session file");
            Ok(Entries::new())
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), SessionError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Storage(format!(
                    "cannot remove {}: {}",
                    self.path.display(),
                    e
                ))),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SessionError::Storage(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| SessionError::Storage(format!("cannot serialize entries: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, contents.as_bytes()).map_err(|e| {
            SessionError::Storage(format!("cannot write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            SessionError::Storage(format!("cannot replace {}: {}", self.path.display(), e))
        })
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, SessionError> {
        self.lock
            .lock()
            .map_err(|_| SessionError::Storage("file storage lock poisoned".to_string()))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Entries, SessionError> {
        let _guard = self.guard()?;
        self.read_entries()
    }

    fn store(&self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        let _guard = self.guard()?;
        let mut current = self.read_entries_for_write()?;
        for (key, value) in entries {
            current.insert((*key).to_string(), (*value).to_string());
        }
        self.write_entries(&current)
    }

    fn remove(&self, keys: &[&str]) -> Result<(), SessionError> {
        let _guard = self.guard()?;
        let mut current = self.read_entries_for_write()?;
        for key in keys {
            current.remove(*key);
        }
        self.write_entries(&current)
    }

    fn remove_if(
        &self,
        keys: &[&str],
        condition: &dyn Fn(&Entries) -> bool,
    ) -> Result<bool, SessionError> {
        let _guard = self.guard()?;
        let mut current = self.read_entries_for_write()?;
        if !condition(&current) {
            return Ok(false);
        }
        for key in keys {
            current.remove(*key);
        }
        self.write_entries(&current)?;
        Ok(true)
    }
}

/// Write `contents` to a file readable by the owner only.
///
/// A fresh file is created with mode 0600; a leftover file is narrowed to
/// 0600 before anything is written into it.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}
