use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A handle to one named writer lock.
///
/// Cloning the handle shares the same underlying mutex.
#[derive(Clone)]
pub struct LockHandle {
    lock: Arc<Mutex<()>>,
}

impl LockHandle {
    /// Blocks until the lock is held exclusively.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }
}

/// Registry of named writer locks.
///
/// Used to serialize mutations per resource (one collection's schema
/// publication at a time) while leaving unrelated resources independent.
/// Readers never touch these locks.
///
/// # Examples
///
/// ```
/// use vellum::common::LockRegistry;
/// let registry = LockRegistry::new();
/// let handle = registry.get_lock("orders");
/// {
///     let _guard = handle.lock();
///     // only one writer for "orders" runs here
/// }
/// ```
#[derive(Clone, Default)]
pub struct LockRegistry {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        LockRegistry {
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Gets the lock for the given name, creating it on first use.
    pub fn get_lock(&self, name: &str) -> LockHandle {
        let lock = self
            .locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        LockHandle { lock }
    }

    /// Returns the number of named locks created so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
