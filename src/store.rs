// User store: the whole username -> account mapping lives in a single JSON
// document that is read and rewritten in full on every operation.
//
// Layout on disk:
//
//     {
//         "alice": { "password": "...", "privilege": 1 }
//     }
//
// Writes go through a temporary file in the same directory and are renamed
// over the target, so a crash mid-write leaves the previous document intact.

use crate::error::{AuthError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// A single persisted account. `password` holds whatever the active
/// credential scheme produced; `privilege` stays a raw integer so that one
/// bad record does not make the rest of the store unreadable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub password: String,
    pub privilege: i64,
}

/// Username -> record, in insertion order.
pub type Users = IndexMap<String, AccountRecord>;

/// Handle on the persisted store file.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UserStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store as an empty document (`{}`) if it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::StoreWrite(format!("creating {}: {}", parent.display(), e))
            })?;
        }
        info!(path = %self.path.display(), "Initializing empty user store");
        self.save(&Users::new())
    }

    /// Load the full mapping, reporting any failure instead of returning it.
    /// A missing, unreadable or malformed store reads as "no users".
    pub fn load(&self) -> Users {
        match self.try_load() {
            Ok(users) => users,
            Err(e) => {
                error!(path = %self.path.display(), "{}", e);
                Users::new()
            }
        }
    }

    /// Like [`UserStore::load`] but hands the failure back to the caller.
    pub fn try_load(&self) -> Result<Users> {
        self.initialize()?;
        let data = fs::read_to_string(&self.path)
            .map_err(|e| AuthError::StoreRead(format!("{}: {}", self.path.display(), e)))?;
        let users: Users = serde_json::from_str(&data)
            .map_err(|e| AuthError::StoreRead(format!("{}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), count = users.len(), "Loaded user store");
        Ok(users)
    }

    /// Replace the persisted document with `users`.
    pub fn save(&self, users: &Users) -> Result<()> {
        self.write_atomically(users).map_err(|e| {
            let err = AuthError::StoreWrite(format!("{}: {}", self.path.display(), e));
            error!("{}", err);
            err
        })?;
        debug!(path = %self.path.display(), count = users.len(), "Saved user store");
        Ok(())
    }

    fn write_atomically(&self, users: &Users) -> std::io::Result<()> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        users.serialize(&mut ser)?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&buf)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    // `Path::parent` yields "" for bare file names; treat that as no parent.
    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}
