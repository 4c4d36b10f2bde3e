//! Durable key-value storage
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, throwaway sessions)
//! - `FileStore`: one JSON file per key, replaced via tmp file + rename (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Values are JSON strings. Missing or corrupt data reads as "nothing stored".
//! `load_json` also degrades failed reads to nothing; `try_load_json` and all
//! writes report their errors to the caller.

mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize value for key `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-to-string store that outlives the process
pub trait KeyValueStore {
    /// Raw value under `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
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

/// Read and decode `key`. Missing, unreadable or corrupt values yield `None`.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    match try_load_json(store, key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Could not read `{}`, treating as empty: {}", key, e);
            None
        }
    }
}

/// Read and decode `key` for a read-modify-write.
///
/// Missing or corrupt values yield `Ok(None)`; a failed read is returned so
/// the caller does not overwrite data it never saw.
pub fn try_load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("Discarding corrupt data under `{}`: {}", key, e);
            Ok(None)
        }
    }
}

/// Encode and write `value` under `key`
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}
