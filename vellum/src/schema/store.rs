use dashmap::DashMap;
use std::ops::Deref;
use std::sync::Arc;

use crate::common::{atomic, Atomic, LockRegistry, ReadExecutor, WriteExecutor};
use crate::config::CoreConfig;
use crate::errors::{ErrorKind, VellumError, VellumResult};
use crate::schema::{CollectionSchema, CreateOptions, SchemaBuilder};

type Versions = Atomic<Vec<Arc<CollectionSchema>>>;

/// Append-only store of published schema versions, keyed by collection.
///
/// Writers are serialized per collection; readers never block on a writer
/// and observe either the previous latest version or the new one.
#[derive(Clone)]
pub struct SchemaStore {
    inner: Arc<SchemaStoreInner>,
}

impl SchemaStore {
    pub fn new(config: CoreConfig) -> Self {
        SchemaStore {
            inner: Arc::new(SchemaStoreInner::new(config)),
        }
    }
}

impl Default for SchemaStore {
    fn default() -> Self {
        SchemaStore::new(CoreConfig::default())
    }
}

impl Deref for SchemaStore {
    type Target = Arc<SchemaStoreInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct SchemaStoreInner {
    builder: SchemaBuilder,
    collections: DashMap<String, Versions>,
    lock_registry: LockRegistry,
}

impl SchemaStoreInner {
    fn new(config: CoreConfig) -> Self {
        SchemaStoreInner {
            builder: SchemaBuilder::new(config),
            collections: DashMap::new(),
            lock_registry: LockRegistry::new(),
        }
    }

    /// Creates the first schema version of a collection or evolves it.
    ///
    /// Submitting the exact bytes of the latest version is a no-op that
    /// returns that version.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::CollectionAlreadyExists] when `options` is create-only
    ///   and the collection already has a schema
    /// * [ErrorKind::SchemaBuildError] / [ErrorKind::SchemaCompatibilityError]
    ///   from the builder; the current version stays in place
    pub fn create_or_update(
        &self,
        name: &str,
        raw: &[u8],
        options: &CreateOptions,
    ) -> VellumResult<Arc<CollectionSchema>> {
        let handle = self.lock_registry.get_lock(name);
        let _guard = handle.lock();

        let schema = match self.latest(name) {
            Some(existing) => {
                if options.is_only_create() {
                    log::error!("Schema for collection {} already exists", name);
                    return Err(VellumError::new(
                        "collection already exist",
                        ErrorKind::CollectionAlreadyExists,
                    ));
                }
                if existing.raw() == raw {
                    return Ok(existing);
                }
                self.builder.build_update(&existing, raw)?
            }
            None => self.builder.build(name, raw)?,
        };

        let schema = Arc::new(schema);
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| atomic(Vec::new()))
            .write_with(|versions| versions.push(schema.clone()));

        log::info!("Published schema for collection {} version {}", name, schema.version());
        Ok(schema)
    }

    /// Latest published version of a collection's schema.
    pub fn latest(&self, name: &str) -> Option<Arc<CollectionSchema>> {
        let versions = self.collections.get(name)?;
        versions.read_with(|v| v.last().cloned())
    }

    pub fn get_version(&self, name: &str, version: u32) -> Option<Arc<CollectionSchema>> {
        let versions = self.collections.get(name)?;
        versions.read_with(|v| v.iter().find(|s| s.version() == version).cloned())
    }

    /// All published versions of a collection, oldest first.
    pub fn versions(&self, name: &str) -> Vec<Arc<CollectionSchema>> {
        match self.collections.get(name) {
            Some(versions) => versions.read_with(|v| v.clone()),
            None => Vec::new(),
        }
    }

    /// Names of all collections with at least one published version, sorted.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn config(&self) -> &CoreConfig {
        self.builder.config()
    }
}
