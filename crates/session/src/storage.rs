//! Durable key/value storage for the credential and principal snapshot
//!
//! The interface mirrors browser `localStorage`: string keys, string values,
//! removal of a missing key is not an error.

use crmai_core::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable session storage shared by the whole process
pub trait SessionStorage: Send + Sync {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value; removing a missing key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("lock poisoned".into())
}

/// Process-local storage, used by tests and `--ephemeral` runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with the given entries
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: Mutex::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().map(|items| items.is_empty()).unwrap_or(true)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.items.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.items
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.items.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// JSON object file on disk, rewritten atomically on every change
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

    fn load(&self) -> CoreResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(CoreError::io(format!("reading {}", self.path.display()))(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, items: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(CoreError::io(format!("creating {}", parent.display())))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, serde_json::to_string_pretty(items)?.as_bytes())
            .map_err(CoreError::io(format!("writing {}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(CoreError::io(format!("replacing {}", self.path.display())))
    }

    fn update<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.load()?;
        if f(&mut items) {
            self.save(&items)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.update(|items| items.remove(key).is_some())
    }
}
