//! Session-scoped history storage.
//!
//! History is stored as a JSON array of move tokens, e.g. `["R","U'"]`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Where move history lives between sessions.
pub trait SessionStore: Send + Sync {
    /// Stored tokens, oldest first. Missing data is an empty history.
    fn load(&self) -> Result<Vec<String>>;

    /// Replace the stored tokens.
    fn save(&self, tokens: &[String]) -> Result<()>;
}

/// In-process store, useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tokens: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Mutex::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    /// Current contents.
    pub fn tokens(&self) -> Result<Vec<String>> {
        self.lock().map(|t| t.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<String>>> {
        self.tokens
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".into()))
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>> {
        self.tokens()
    }

    fn save(&self, tokens: &[String]) -> Result<()> {
        *self.lock()? = tokens.to_vec();
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, tokens: &[String]) -> Result<()> {
        let json = serde_json::to_string(tokens)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
