use std::collections::HashMap;

use crate::errors::CoreError;

/// String-keyed, string-valued persistence adapter.
///
/// The contract of the browser's local storage, abstracted so the core
/// can run against an in-memory map in tests, a JSON file natively, or
/// whatever the embedding provides. Synchronous and fallible: a failed
/// write is reported, and the caller decides whether to degrade.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Volatile store backed by a `HashMap`. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable store backed by a single JSON-object file (native only).
///
/// The whole map is rewritten on every `set` — the records are small and
/// the write pattern matches local storage, so simplicity wins.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or create) a store file. A missing file starts empty; a
    /// malformed one is an error — the caller chooses whether to start
    /// over.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Deserialization(format!(
                    "store file {} is not a JSON object: {e}",
                    path.display()
                )))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), CoreError> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
