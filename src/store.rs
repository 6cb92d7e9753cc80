//! Secret Persistence
//!
//! Remembers the last submitted secret between sessions in a single
//! plain-text file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zeroize::Zeroize;

use crate::totp::Secret;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Secret store unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait SecretStore {
    /// Last saved secret. A store with nothing saved yields `Ok(None)`.
    fn load(&self) -> StoreResult<Option<Secret>>;

    fn save(&mut self, secret: &Secret) -> StoreResult<()>;
}

/// Stores the secret in one file, readable only by the owner on unix
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self) -> StoreResult<Option<Secret>> {
        let mut contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.unavailable(e)),
        };

        let secret = Secret::parse(&contents);
        contents.zeroize();
        Ok(secret)
    }

    fn save(&mut self, secret: &Secret) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }

        write_private(&self.path, secret.expose()).map_err(|e| self.unavailable(e))
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}

/// In-memory store for tests. Clones share state.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    pub secret: std::rc::Rc<std::cell::RefCell<Option<Secret>>>,
    pub fail: std::rc::Rc<std::cell::Cell<bool>>,
    pub saves: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemorySecretStore {
    fn denied() -> StoreError {
        StoreError::Unavailable {
            path: PathBuf::from(":memory:"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
    }
}

#[cfg(test)]
impl SecretStore for MemorySecretStore {
    fn load(&self) -> StoreResult<Option<Secret>> {
        if self.fail.get() {
            return Err(Self::denied());
        }
        Ok(self.secret.borrow().clone())
    }

    fn save(&mut self, secret: &Secret) -> StoreResult<()> {
        if self.fail.get() {
            return Err(Self::denied());
        }
        self.saves.set(self.saves.get() + 1);
        *self.secret.borrow_mut() = Some(secret.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileSecretStore::new(dir.path().join("secret"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = FileSecretStore::new(dir.path().join("nested").join("secret"));
        let secret = Secret::parse("JBSWY3DPEHPK3PXP").unwrap();

        store.save(&secret).unwrap();
        assert_eq!(store.load().unwrap(), Some(secret));
    }

    #[test]
    fn test_save_replaces_previous() {
        let dir = tempdir().unwrap();
        let mut store = FileSecretStore::new(dir.path().join("secret"));

        store.save(&Secret::parse("JBSWY3DPEHPK3PXP").unwrap()).unwrap();
        store.save(&Secret::parse("GEZDGNBV").unwrap()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "GEZDGNBV");
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secret");
        fs::write(&path, "  \n").unwrap();

        let store = FileSecretStore::new(path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_unreadable_path_is_unavailable() {
        let dir = tempdir().unwrap();
        // A directory where the file should be
        let store = FileSecretStore::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::Unavailable { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let mut store = FileSecretStore::new(dir.path().join("secret"));
        store.save(&Secret::parse("JBSWY3DPEHPK3PXP").unwrap()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
