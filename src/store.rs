use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// The only key the clipper persists: the dashboard session token
pub const TOKEN_KEY: &str = "clerk_token";

/// Errors from reading or writing the backing file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable key-value store backing the token relay
///
/// A JSON map in a single file. Writes are whole-file overwrites, so
/// concurrent writers are last-write-wins, which is the semantics the
/// relay relies on: stale credentials are overwritten, never merged.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file (created lazily on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read a value; a missing file or missing key is `None`, not an error
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    /// Write a value, overwriting any previous one
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    /// Remove a value; removing an absent key is a no-op
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    /// The stored session token, if any
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.get(TOKEN_KEY)
    }

    /// Persist a freshly relayed session token
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.set(TOKEN_KEY, token)
    }

    /// Delete the session token (explicit logout)
    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.remove(TOKEN_KEY)
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}
