//! Persistent user identity.
//!
//! The daily card depends on an opaque user id that is created once and
//! then kept for the life of the installation. Storage is an injected
//! key-value capability so tests can run against [`MemoryStore`].

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use tempfile::NamedTempFile;

use crate::error::SessionResult;

/// User id used when storage cannot be read.
pub const FALLBACK_USER_ID: &str = "default";

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A durable string key-value store.
pub trait KeyValueStore: Send {
    /// Read a value.
    fn get(&self, key: &str) -> SessionResult<Option<String>>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> SessionResult<()>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one key already set.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store kept as a flat JSON object in a single file.
///
/// A missing file reads as empty. Parent directories are created on write,
/// and writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        let mut values = self.read_all()?;
        if values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        values.insert(key.to_string(), value.to_string());
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        // Readers see either the old file or the new one, never a partial write.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(&values)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Generate a short random lowercase alphanumeric id.
pub fn generate_user_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Read the user id under `key`, creating and storing one if absent.
///
/// A read failure yields [`FALLBACK_USER_ID`] and nothing is written, so an
/// existing id is never overwritten. A failed write still returns the new id
/// for this session.
pub fn resolve_user_id<R: Rng + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    len: usize,
    rng: &mut R,
) -> String {
    match store.get(key) {
        Ok(Some(id)) if !id.is_empty() => id,
        Ok(_) => {
            let id = generate_user_id(rng, len.clamp(4, 32));
            if let Err(e) = store.set(key, &id) {
                tracing::warn!(key, error = %e, "failed to persist user id");
            } else {
                tracing::info!(key, "created user id");
            }
            id
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read user id, using fallback");
            FALLBACK_USER_ID.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const KEY: &str = "loveResilience_userId";

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> SessionResult<Option<String>> {
            Err(SessionError::Storage("unavailable".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> SessionResult<()> {
            panic!("must not write after a failed read");
        }
    }

    #[test]
    fn generated_ids_are_lowercase_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(3);
        let id = generate_user_id(&mut rng, 10);
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn creates_once_then_reuses() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let first = resolve_user_id(&mut store, KEY, 8, &mut rng);
        let second = resolve_user_id(&mut store, KEY, 8, &mut rng);
        assert_eq!(first, second);
        assert_eq!(store.get(KEY).unwrap(), Some(first));
    }

    #[test]
    fn existing_id_is_kept() {
        let mut store = MemoryStore::with_value(KEY, "testUser");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(resolve_user_id(&mut store, KEY, 8, &mut rng), "testUser");
    }

    #[test]
    fn empty_value_is_replaced() {
        let mut store = MemoryStore::with_value(KEY, "");
        let mut rng = StdRng::seed_from_u64(3);
        let id = resolve_user_id(&mut store, KEY, 8, &mut rng);
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn read_failure_falls_back_without_writing() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(resolve_user_id(&mut FailingStore, KEY, 8, &mut rng), "default");
    }

    #[test]
    fn json_file_store_persists_across_instances() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("identity.json");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(KEY).unwrap(), None);
        store.set(KEY, "abc123").unwrap();
        store.set("other", "x").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(KEY).unwrap(), Some("abc123".to_string()));
        assert_eq!(reopened.get("other").unwrap(), Some("x".to_string()));
    }

    #[test]
    fn json_file_store_replaces_file_whole() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, r#"{"other": "a much longer value than the next one"}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set(KEY, "k1").unwrap();
        store.set(KEY, "k2").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let values: BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
        assert_eq!(values.get(KEY).map(String::as_str), Some("k2"));
        assert_eq!(values.len(), 2);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("identity.json")]);
    }

    #[test]
    fn json_file_store_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(KEY), Err(SessionError::Json(_))));
    }
}
