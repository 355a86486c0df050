//! In-memory item store for tests/dev.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use async_trait::async_trait;
use tracing::debug;

use pantry_core::{ItemFields, ItemId};

use crate::store::{ITEMS_COLLECTION, ItemDocument, ItemStore, StoreError};
use crate::subscription::{SnapshotCallback, Subscription};

/// In-memory document store with live queries.
///
/// - Documents are kept in insertion order; notifications are **not** sorted
/// - Every subscriber gets the full collection on subscribe and after each write
/// - Callbacks run synchronously on the writer's thread, in write order: a
///   subscriber never sees an older collection after a newer one. Callbacks
///   must not write to the store.
/// - `fail_writes(true)` makes every write fail (fault injection for tests)
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    docs: RwLock<Vec<ItemDocument>>,
    subscribers: Mutex<BTreeMap<u64, Arc<SnapshotCallback>>>,
    /// Held from mutation until every callback has seen the result.
    delivery: Mutex<()>,
    next_subscriber: AtomicU64,
    failing: AtomicBool,
}

impl core::fmt::Debug for Inner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Inner")
            .field("docs", &self.docs)
            .field("failing", &self.failing)
            .finish_non_exhaustive()
    }
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed documents without notifying subscribers.
    pub fn with_documents(docs: impl IntoIterator<Item = ItemDocument>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.inner.docs.write() {
            guard.extend(docs);
        }
        store
    }

    /// Make every subsequent write fail with `StoreError::Unavailable`.
    pub fn fail_writes(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Current collection contents, in insertion order.
    pub fn documents(&self) -> Vec<ItemDocument> {
        self.inner
            .docs
            .read()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    fn write<T>(&self, f: impl FnOnce(&mut Vec<ItemDocument>) -> T) -> Result<T, StoreError> {
        self.check_writable()?;
        let _delivery = self.inner.delivery.lock().map_err(|_| StoreError::Poisoned)?;
        let (out, snapshot) = {
            let mut docs = self.inner.docs.write().map_err(|_| StoreError::Poisoned)?;
            let out = f(&mut docs);
            (out, docs.clone())
        };
        self.inner.notify(snapshot);
        Ok(out)
    }
}

impl Inner {
    fn notify(&self, snapshot: Vec<ItemDocument>) {
        let callbacks: Vec<Arc<SnapshotCallback>> = match self.subscribers.lock() {
            Ok(subs) => subs.values().cloned().collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(snapshot.clone());
        }
    }

    fn remove_subscriber(&self, key: u64) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.remove(&key);
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn create(&self, fields: ItemFields) -> Result<ItemId, StoreError> {
        let id = ItemId::generate();
        let doc_id = id.clone();
        self.write(move |docs| docs.push(ItemDocument::new(doc_id, fields)))?;
        debug!(item_id = %id, "document created");
        Ok(id)
    }

    async fn set(&self, id: &ItemId, fields: ItemFields) -> Result<(), StoreError> {
        self.write(|docs| match docs.iter().position(|d| &d.id == id) {
            Some(idx) => docs[idx].fields = fields,
            None => docs.push(ItemDocument::new(id.clone(), fields)),
        })?;
        debug!(item_id = %id, "document set");
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> Result<(), StoreError> {
        self.write(|docs| docs.retain(|d| &d.id != id))?;
        debug!(item_id = %id, "document deleted");
        Ok(())
    }

    fn subscribe(&self, on_snapshot: SnapshotCallback) -> Result<Subscription, StoreError> {
        let key = self.inner.next_subscriber.fetch_add(1, Ordering::SeqCst);
        let callback = Arc::new(on_snapshot);

        let _delivery = self.inner.delivery.lock().map_err(|_| StoreError::Poisoned)?;
        self.inner
            .subscribers
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key, callback.clone());

        debug!(collection = ITEMS_COLLECTION, subscriber = key, "live query registered");

        // Initial delivery: current contents.
        callback(self.documents());

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove_subscriber(key);
            }
        }))
    }
}
