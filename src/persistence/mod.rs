//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` seam over browser LocalStorage (wasm32) or memory
//! - JSON helpers that log and swallow failures (writes are best-effort)

#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// No storage available (private mode, sandboxed iframe, native build)
    #[error("storage unavailable")]
    Unavailable,

    /// Backend refused the operation (quota exceeded, security error)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Value could not be encoded or decoded
    #[error("invalid stored value for {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Browser storage when available, otherwise an in-memory stand-in
#[cfg(target_arch = "wasm32")]
pub fn open_default() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Some(store) => Box::new(store),
        None => Box::new(MemoryStore::new()),
    }
}

/// Native builds keep everything in memory
#[cfg(not(target_arch = "wasm32"))]
pub fn open_default() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}

/// Read and decode a JSON value
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Load a JSON value, treating any failure as "nothing stored"
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match read_json(store, key) {
        Ok(Some(value)) => {
            log::info!("Loaded {}", key);
            value
        }
        Ok(None) => {
            log::info!("Nothing stored under {}, using defaults", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Ignoring stored {}: {}", key, e);
            T::default()
        }
    }
}

/// Save a JSON value, logging and dropping any failure
pub fn save_best_effort<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    if let Err(e) = write_json(store, key, value) {
        log::warn!("Failed to save {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn test_json_roundtrip_through_store() {
        let mut store = MemoryStore::new();
        write_json(&mut store, "k", &Sample { n: 4 }).unwrap();
        let back: Option<Sample> = read_json(&store, "k").unwrap();
        assert_eq!(back, Some(Sample { n: 4 }));
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert!(matches!(
            read_json::<Sample, _>(&store, "k"),
            Err(StorageError::Json { .. })
        ));
        let value: Sample = load_or_default(&store, "k");
        assert_eq!(value, Sample::default());
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut store = MemoryStore::unavailable();
        save_best_effort(&mut store, "k", &Sample { n: 1 });
        let value: Sample = load_or_default(&store, "k");
        assert_eq!(value, Sample::default());
    }
}
