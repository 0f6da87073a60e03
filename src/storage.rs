//! Persistence Layer
//!
//! Abstract key/value storage for the todo list, with a browser
//! `localStorage` backend and an in-memory backend.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Todo;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read key: {0}")]
    Read(String),
    #[error("failed to write key: {0}")]
    Write(String),
    #[error("malformed todo list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no todo ids left")]
    IdsExhausted,
    #[error("{0} holds an unreadable list; not overwriting it")]
    Unreadable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store holding the serialized list
pub trait TodoStorage {
    /// Raw value under `key`, `None` when never written
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: TodoStorage + ?Sized> TodoStorage for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

/// Where an unreadable value under `key` is moved before it is replaced
pub fn backup_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

pub fn encode_todos(todos: &[Todo]) -> StorageResult<String> {
    Ok(serde_json::to_string(todos)?)
}

pub fn decode_todos(raw: &str) -> StorageResult<Vec<Todo>> {
    Ok(serde_json::from_str(raw)?)
}

/// `window.localStorage`
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl TodoStorage for BrowserStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{}: {:?}", key, e)))
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{}: {:?}", key, e)))
    }
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of writes since creation
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TodoStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
