//! Process-lifetime caches for schemas and converters.
//!
//! Lookups take a read lock. On a miss the entry is built without holding any
//! lock and inserted afterwards; if another thread inserted first, its entry
//! wins and ours is dropped, so every caller sees the same `Arc`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{ConstTypeId, ConvertError, Converter, Schema, Shape, debug};

/// Key of a cached [`Schema`]: the record and the fingerprint of the options it was built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    /// the record
    pub shape: ConstTypeId,
    /// cf. [`crate::Options::fingerprint`]
    pub fingerprint: u64,
}

impl SchemaKey {
    /// Key for `shape` under options with the given fingerprint.
    pub fn new(shape: &'static Shape, fingerprint: u64) -> Self {
        SchemaKey {
            shape: shape.id,
            fingerprint,
        }
    }
}

/// Key of a cached converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConverterKey {
    /// source type
    pub src: ConstTypeId,
    /// destination type
    pub dst: ConstTypeId,
    /// cf. [`crate::Options::fingerprint`]
    pub fingerprint: u64,
}

impl ConverterKey {
    /// Key for converting `src` into `dst` under options with the given fingerprint.
    pub fn new(src: &'static Shape, dst: &'static Shape, fingerprint: u64) -> Self {
        ConverterKey {
            src: src.id,
            dst: dst.id,
            fingerprint,
        }
    }
}

/// A concurrent map where the first insertion of a key is final.
struct FirstWins<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for FirstWins<K, V> {
    fn default() -> Self {
        FirstWins {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + core::fmt::Debug, V: Clone> FirstWins<K, V> {
    fn get_or_build(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V, ConvertError>,
    ) -> Result<V, ConvertError> {
        // Fast path: check read lock first
        if let Some(value) = self.entries.read().get(&key) {
            return Ok(value.clone());
        }

        // Slow path: building may recurse into this cache, so no lock is held
        let built = build()?;

        let mut entries = self.entries.write();
        match entries.entry(key) {
            Entry::Occupied(entry) => {
                debug!(key = ?entry.key(), "lost race, keeping the first entry");
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => Ok(entry.insert(built).clone()),
        }
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Schemas by record and options fingerprint.
#[derive(Default)]
pub struct SchemaCache {
    inner: FirstWins<SchemaKey, Arc<Schema>>,
}

impl SchemaCache {
    /// Returns the cached schema, building it with `build` on a miss.
    ///
    /// Failures are not cached.
    pub fn get_or_build(
        &self,
        key: SchemaKey,
        build: impl FnOnce() -> Result<Schema, ConvertError>,
    ) -> Result<Arc<Schema>, ConvertError> {
        self.inner.get_or_build(key, || build().map(Arc::new))
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

/// Converters by source type, destination type and options fingerprint.
#[derive(Default)]
pub struct ConverterCache {
    inner: FirstWins<ConverterKey, Converter>,
}

impl ConverterCache {
    /// Returns the cached converter, building it with `build` on a miss.
    ///
    /// Failures are not cached.
    pub fn get_or_build(
        &self,
        key: ConverterKey,
        build: impl FnOnce() -> Result<Converter, ConvertError>,
    ) -> Result<Converter, ConvertError> {
        self.inner.get_or_build(key, build)
    }

    /// Number of cached converters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.clear();
    }
}
