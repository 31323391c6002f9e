use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend is not available: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage call rejected by the browser: {0}")]
    Js(String),
}

/// Key/value persistence used by bits to keep progress between sessions.
///
/// Values are opaque strings; each bit decides how to encode its own record.
pub trait Storage: Send + Sync + 'static {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage, handy for tests and for platforms without persistence.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Stores every key as `<dir>/<key>.json`.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStorage {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Browser `localStorage`. The handle is looked up on every call since
/// `web_sys::Storage` can't be kept in a `Send` resource.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global `window` exists".to_owned()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Js(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_owned()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?
            .get_item(key)
            .map_err(|err| StorageError::Js(format!("{err:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|err| StorageError::Js(format!("{err:?}")))
    }
}

/// Picks the persistent backend for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn default_storage(_bit_name: &str) -> Box<dyn Storage> {
    Box::new(LocalStorage)
}

/// Picks the persistent backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_storage(bit_name: &str) -> Box<dyn Storage> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from);
    Box::new(FileStorage::new(data_dir(home, bit_name)))
}

/// Hidden per-user directory, `~/.<bit_name>`, or the working directory when
/// no home is known.
#[cfg(not(target_arch = "wasm32"))]
fn data_dir(home: Option<PathBuf>, bit_name: &str) -> PathBuf {
    home.unwrap_or_else(|| PathBuf::from("."))
        .join(format!(".{bit_name}"))
}
