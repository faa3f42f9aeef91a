//! Sequential folio numbers
//!
//! The counter holds the folio the *next* receipt will carry. Taking a folio
//! reads the stored value and writes it back incremented. There is no
//! protection against two writers racing on the same store.

use crate::{ReceiptError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage key holding the next folio
pub const FOLIO_KEY: &str = "folioNumero";

/// Folio used when the store has no usable value
pub const DEFAULT_FOLIO: u64 = 1532;

/// Source of receipt numbers
pub trait FolioCounter {
    /// The folio the next receipt will get, without consuming it
    fn peek(&self) -> Result<u64>;

    /// Consume the current folio and advance the counter
    fn next(&mut self) -> Result<u64>;
}

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// A missing file reads as an empty store; the file is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }

        match serde_json::from_str(&content)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(ReceiptError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .get(key)
            .map(crate::parser::value_to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        let content = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Read a stored folio the way `parseInt` would: leading digits only
pub fn parse_folio(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Folio counter persisted in a [`KeyValueStore`] under [`FOLIO_KEY`]
#[derive(Debug, Clone)]
pub struct StoredFolioCounter<S> {
    store: S,
}

impl<S: KeyValueStore> StoredFolioCounter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> FolioCounter for StoredFolioCounter<S> {
    fn peek(&self) -> Result<u64> {
        let Some(raw) = self.store.get(FOLIO_KEY)? else {
            return Ok(DEFAULT_FOLIO);
        };

        match parse_folio(&raw) {
            Some(folio) => Ok(folio),
            None => {
                tracing::warn!(
                    value = %raw,
                    fallback = DEFAULT_FOLIO,
                    "stored folio is not a number"
                );
                Ok(DEFAULT_FOLIO)
            }
        }
    }

    fn next(&mut self) -> Result<u64> {
        let folio = self.peek()?;
        self.store.set(FOLIO_KEY, &(folio + 1).to_string())?;
        tracing::debug!(folio, "folio taken");
        Ok(folio)
    }
}

/// Counter whose value lives only in this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InMemoryFolioCounter {
    next: u64,
}

impl InMemoryFolioCounter {
    /// Start at `next`; zero starts at [`DEFAULT_FOLIO`]
    pub fn new(next: u64) -> Self {
        Self {
            next: if next == 0 { DEFAULT_FOLIO } else { next },
        }
    }
}

impl Default for InMemoryFolioCounter {
    fn default() -> Self {
        Self::new(DEFAULT_FOLIO)
    }
}

impl FolioCounter for InMemoryFolioCounter {
    fn peek(&self) -> Result<u64> {
        Ok(self.next)
    }

    fn next(&mut self) -> Result<u64> {
        let folio = self.next;
        self.next += 1;
        Ok(folio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_when_absent() {
        let mut counter = StoredFolioCounter::new(MemoryStore::new());
        assert_eq!(counter.peek().unwrap(), 1532);
        assert_eq!(counter.next().unwrap(), 1532);
        assert_eq!(counter.next().unwrap(), 1533);
        assert_eq!(counter.peek().unwrap(), 1534);
        assert_eq!(
            counter.store().get(FOLIO_KEY).unwrap(),
            Some("1534".to_string())
        );
    }

    #[test]
    fn test_resumes_from_store() {
        let mut store = MemoryStore::new();
        store.set(FOLIO_KEY, "2001").unwrap();
        let mut counter = StoredFolioCounter::new(store);
        assert_eq!(counter.next().unwrap(), 2001);
        assert_eq!(counter.peek().unwrap(), 2002);
    }

    #[test]
    fn test_parse_folio() {
        assert_eq!(parse_folio("1532"), Some(1532));
        assert_eq!(parse_folio("  42abc"), Some(42));
        assert_eq!(parse_folio("+7"), Some(7));
        assert_eq!(parse_folio("abc"), None);
        assert_eq!(parse_folio(""), None);
        assert_eq!(parse_folio("-5"), None);
        assert_eq!(parse_folio("0"), None);
    }

    #[test]
    fn test_garbage_falls_back() {
        let mut store = MemoryStore::new();
        store.set(FOLIO_KEY, "not-a-number").unwrap();
        let mut counter = StoredFolioCounter::new(store);
        assert_eq!(counter.next().unwrap(), 1532);
        assert_eq!(counter.peek().unwrap(), 1533);
    }

    #[test]
    fn test_in_memory_counter() {
        let mut counter = InMemoryFolioCounter::new(10);
        assert_eq!(counter.next().unwrap(), 10);
        assert_eq!(counter.next().unwrap(), 11);
        assert_eq!(counter.peek().unwrap(), 12);
        assert_eq!(InMemoryFolioCounter::new(0).peek().unwrap(), 1532);
    }

    #[test]
    fn test_json_file_store() {
        let path = std::env::temp_dir().join("receipt_folio_store_test.json");
        let _ = std::fs::remove_file(&path);

        let mut counter = StoredFolioCounter::new(JsonFileStore::new(&path));
        assert_eq!(counter.next().unwrap(), 1532);

        // a fresh handle sees the persisted value
        let reopened = StoredFolioCounter::new(JsonFileStore::new(&path));
        assert_eq!(reopened.peek().unwrap(), 1533);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"folioNumero\": \"1533\""));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_file_store_rejects_non_object() {
        let path = std::env::temp_dir().join("receipt_folio_store_array.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(FOLIO_KEY), Err(ReceiptError::Storage(_))));
        let _ = std::fs::remove_file(&path);
    }
}
