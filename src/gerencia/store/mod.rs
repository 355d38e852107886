//! # Storage Layer
//!
//! Gerencia persists everything in a flat key-value medium: every key holds one
//! JSON document. Four keys are used:
//!
//! ```text
//! usuarios        # JSON array of users
//! usuarioLogado   # the active session (single user object, optional)
//! produtos        # JSON array of products
//! financeiro      # JSON array of cash-flow movements
//! ```
//!
//! Storage is split in two layers:
//!
//! - [`KeyValueStore`]: the raw medium. Knows how to get/set/remove text under
//!   a key and nothing else.
//!   - [`fs::FileStore`]: production backend, one `<key>.json` file per key.
//!   - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//! - [`RecordStore`]: the typed layer on top. Parses and validates records on
//!   load and serializes whole collections on save.
//!
//! ## Leniency
//!
//! View reads never fail. A missing key, an unreadable file or a value that is
//! not a JSON array all load as an empty collection; a single record that does
//! not decode is dropped while its siblings are kept. Each anomaly is logged
//! with `warn!`. Reads that precede a save go through
//! [`RecordStore::load_for_update`], which returns backend read errors instead
//! of an empty collection. Writes fail loudly: a collection that cannot be
//! persisted is an error for the caller.
//!
//! Saves replace the entire collection. There is a single writer per data
//! directory, so the last write wins.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

pub const USERS: &str = "usuarios";
pub const SESSION: &str = "usuarioLogado";
pub const PRODUCTS: &str = "produtos";
pub const MOVEMENTS: &str = "financeiro";

/// Abstract interface for the raw key-value medium.
///
/// Methods take `&self`; backends that need mutation use interior mutability.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    /// MUST be atomic: readers see either the old or the new value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed collections over a [`KeyValueStore`].
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load a collection in stored order. Never fails; see module docs.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        match self.read_raw(collection) {
            Some(raw) => decode_collection(collection, &raw),
            None => Vec::new(),
        }
    }

    /// Load a collection that is about to be modified and saved back.
    ///
    /// Malformed content still degrades to empty, but a backend read error is
    /// returned: saving over a collection we could not read would erase it.
    pub fn load_for_update<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        match self.backend.get(collection)? {
            Some(raw) => Ok(decode_collection(collection, &raw)),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a collection with `records`.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<()> {
        let content = serde_json::to_string(records)?;
        self.backend.set(collection, &content)?;
        debug!(collection, saved = records.len(), "saved collection");
        Ok(())
    }

    /// Load a single-record key such as the session marker.
    pub fn load_one<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "malformed stored record, ignoring");
                None
            }
        }
    }

    pub fn save_one<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let content = serde_json::to_string(record)?;
        self.backend.set(key, &content)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, treating as absent");
                None
            }
        }
    }
}

fn decode_collection<T: DeserializeOwned>(collection: &str, raw: &str) -> Vec<T> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(
                collection,
                kind = value_kind(&other),
                "stored collection is not an array, treating as empty"
            );
            return Vec::new();
        }
        Err(e) => {
            warn!(collection, error = %e, "malformed stored data, treating as empty");
            return Vec::new();
        }
    };

    let total = entries.len();
    let records: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(collection, position, error = %e, "dropping malformed record");
                None
            }
        })
        .collect();

    debug!(collection, loaded = records.len(), total, "loaded collection");
    records
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
