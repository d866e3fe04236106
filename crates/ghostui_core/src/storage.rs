//! Durable per-origin storage
//!
//! [`Storage`] is the synchronous key/value contract the theme provider
//! persists through. [`MemoryStorage`] is an in-process origin store shared by
//! any number of browsing contexts: each context gets its own
//! [`StorageArea`], and a write through one area is announced as a
//! [`STORAGE`](crate::event_types::STORAGE) event to every *other* attached
//! context, never to the writer.

use crate::error::StorageError;
use crate::events::{Event, GlobalListeners};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

/// Synchronous key/value storage
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

new_key_type! {
    struct AreaKey;
}

#[derive(Default)]
struct Faults {
    read: Option<StorageError>,
    write: Option<StorageError>,
}

/// In-process origin store
pub struct MemoryStorage {
    items: RwLock<FxHashMap<String, String>>,
    areas: Mutex<SlotMap<AreaKey, Weak<GlobalListeners>>>,
    faults: RwLock<Faults>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            items: RwLock::new(FxHashMap::default()),
            areas: Mutex::new(SlotMap::with_key()),
            faults: RwLock::new(Faults::default()),
            writes: AtomicUsize::new(0),
        })
    }

    /// Create a store pre-populated with one entry
    pub fn with_item(key: &str, value: &str) -> Arc<Self> {
        let storage = Self::new();
        storage
            .items
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Attach a browsing context whose listeners receive change notifications
    pub fn attach(self: &Arc<Self>, listeners: &Arc<GlobalListeners>) -> Arc<StorageArea> {
        let key = self
            .areas
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::downgrade(listeners));
        Arc::new(StorageArea {
            origin: Arc::clone(self),
            key,
        })
    }

    /// Make every subsequent read fail with `error` (`None` heals reads)
    pub fn fail_reads(&self, error: Option<StorageError>) {
        self.faults.write().unwrap_or_else(|e| e.into_inner()).read = error;
    }

    /// Make every subsequent write fail with `error` (`None` heals writes)
    pub fn fail_writes(&self, error: Option<StorageError>) {
        self.faults.write().unwrap_or_else(|e| e.into_inner()).write = error;
    }

    /// Number of contexts still attached
    pub fn attached_contexts(&self) -> usize {
        self.areas
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|listeners| listeners.strong_count() > 0)
            .count()
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(err) = &self.faults.read().unwrap_or_else(|e| e.into_inner()).read {
            return Err(err.clone());
        }
        Ok(self
            .items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: Option<&str>, writer: Option<AreaKey>) -> Result<(), StorageError> {
        if let Some(err) = &self.faults.read().unwrap_or_else(|e| e.into_inner()).write {
            return Err(err.clone());
        }

        let old_value = {
            let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
            match value {
                Some(value) => items.insert(key.to_string(), value.to_string()),
                None => items.remove(key),
            }
        };
        self.writes.fetch_add(1, Ordering::SeqCst);

        if old_value.as_deref() == value {
            return Ok(());
        }

        // Collect recipients first so no lock is held while listeners run
        let recipients: Vec<Arc<GlobalListeners>> = {
            let mut areas = self.areas.lock().unwrap_or_else(|e| e.into_inner());
            areas.retain(|_, listeners| listeners.strong_count() > 0);
            areas
                .iter()
                .filter(|(area, _)| Some(*area) != writer)
                .filter_map(|(_, listeners)| listeners.upgrade())
                .collect()
        };

        let event = Event::storage(key, old_value, value.map(str::to_string));
        for listeners in recipients {
            listeners.dispatch(&event);
        }
        Ok(())
    }

    fn detach(&self, area: AreaKey) {
        self.areas.lock().unwrap_or_else(|e| e.into_inner()).remove(area);
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read(key)
    }

    /// Writes from outside any context notify every attached context
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, Some(value), None)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.write(key, None, None)
    }
}

/// One browsing context's view of a [`MemoryStorage`] origin
pub struct StorageArea {
    origin: Arc<MemoryStorage>,
    key: AreaKey,
}

impl StorageArea {
    pub fn origin(&self) -> &Arc<MemoryStorage> {
        &self.origin
    }
}

impl Storage for StorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.origin.read(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.origin.write(key, Some(value), Some(self.key))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.origin.write(key, None, Some(self.key))
    }
}

impl Drop for StorageArea {
    fn drop(&mut self) {
        self.origin.detach(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{event_types, EventData};

    fn record(listeners: &GlobalListeners) -> Arc<Mutex<Vec<Event>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        listeners
            .add_listener(event_types::STORAGE, move |e| sink.lock().unwrap().push(e.clone()))
            .unwrap();
        seen
    }

    #[test]
    fn test_write_notifies_other_contexts_only() {
        let origin = MemoryStorage::new();
        let tab_a = Arc::new(GlobalListeners::new());
        let tab_b = Arc::new(GlobalListeners::new());
        let area_a = origin.attach(&tab_a);
        let _area_b = origin.attach(&tab_b);
        let seen_a = record(&tab_a);
        let seen_b = record(&tab_b);

        area_a.set_item("k", "v").unwrap();

        assert!(seen_a.lock().unwrap().is_empty());
        let seen_b = seen_b.lock().unwrap();
        assert_eq!(seen_b.len(), 1);
        assert_eq!(
            seen_b[0].data,
            EventData::Storage {
                key: "k".into(),
                old_value: None,
                new_value: Some("v".into()),
            }
        );
    }

    #[test]
    fn test_unchanged_write_is_silent() {
        let origin = MemoryStorage::with_item("k", "v");
        let tab = Arc::new(GlobalListeners::new());
        let _area = origin.attach(&tab);
        let seen = record(&tab);

        origin.set_item("k", "v").unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_faults_surface_as_errors() {
        let origin = MemoryStorage::with_item("k", "v");
        origin.fail_reads(Some(StorageError::Unavailable));
        origin.fail_writes(Some(StorageError::QuotaExceeded));

        assert_eq!(origin.get_item("k"), Err(StorageError::Unavailable));
        assert_eq!(origin.set_item("k", "w"), Err(StorageError::QuotaExceeded));

        origin.fail_reads(None);
        assert_eq!(origin.get_item("k"), Ok(Some("v".to_string())));
    }

    #[test]
    fn test_dropping_area_detaches_context() {
        let origin = MemoryStorage::new();
        let tab = Arc::new(GlobalListeners::new());
        let area = origin.attach(&tab);
        assert_eq!(origin.attached_contexts(), 1);
        drop(area);
        assert_eq!(origin.attached_contexts(), 0);
    }
}
