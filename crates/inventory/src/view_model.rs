//! Inventory view model.
//!
//! Owns the live subscription to the item store and exposes the derived view:
//! sorted snapshot, total, and the search-filtered list.
//!
//! ## Data flow
//!
//! ```text
//! ItemStore ──notification──▶ subscription callback ──send_replace──▶ watch channel
//!                                                                       │
//!                                   InventoryViewModel / SnapshotReader ◀┘ (read-only)
//! ```
//!
//! The subscription callback is the only writer. Each notification replaces
//! the snapshot wholesale; the last notification processed wins.

use std::sync::{Mutex, RwLock};

use tokio::sync::watch;
use tracing::{debug, info};

use pantry_core::{Item, Quantity};
use pantry_store::{ItemStore, StoreError, Subscription};

use crate::snapshot::InventorySnapshot;

/// Read-only handle to the observed snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<InventorySnapshot>,
}

impl SnapshotReader {
    /// The snapshot as of the last processed notification.
    pub fn current(&self) -> InventorySnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next notification.
    ///
    /// Returns `false` once the subscription has been released and no further
    /// notifications can arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until the snapshot satisfies `pred` (checks the current value first).
    pub async fn wait_for(
        &mut self,
        mut pred: impl FnMut(&InventorySnapshot) -> bool,
    ) -> Option<InventorySnapshot> {
        self.rx.wait_for(|s| pred(s)).await.ok().map(|s| s.clone())
    }
}

pub struct InventoryViewModel {
    reader: SnapshotReader,
    search: RwLock<String>,
    subscription: Mutex<Option<Subscription>>,
}

impl InventoryViewModel {
    /// Subscribe to the full item collection for the lifetime of the view.
    pub fn attach<S>(store: &S) -> Result<Self, StoreError>
    where
        S: ItemStore + ?Sized,
    {
        let (tx, rx) = watch::channel(InventorySnapshot::default());

        let subscription = store.subscribe(Box::new(move |docs| {
            let snapshot = InventorySnapshot::from_documents(docs);
            debug!(
                items = snapshot.len(),
                total = snapshot.total(),
                "inventory snapshot replaced"
            );
            tx.send_replace(snapshot);
        }))?;

        info!("inventory view attached to item store");

        Ok(Self {
            reader: SnapshotReader { rx },
            search: RwLock::new(String::new()),
            subscription: Mutex::new(Some(subscription)),
        })
    }

    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        self.reader.current()
    }

    pub fn total(&self) -> Quantity {
        self.reader.rx.borrow().total()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        if let Ok(mut s) = self.search.write() {
            *s = search.into();
        }
    }

    pub fn search(&self) -> String {
        self.search.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Snapshot items filtered by the current search string.
    pub fn visible_items(&self) -> Vec<Item> {
        let search = self.search();
        self.reader.rx.borrow().filter(&search)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .lock()
            .map(|s| s.as_ref().is_some_and(Subscription::is_active))
            .unwrap_or(false)
    }

    /// Release the store subscription. The last snapshot stays readable.
    pub fn teardown(&self) {
        let released = self.subscription.lock().ok().and_then(|mut s| s.take());
        if let Some(subscription) = released {
            subscription.unsubscribe();
            info!("inventory view detached from item store");
        }
    }
}

impl core::fmt::Debug for InventoryViewModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryViewModel")
            .field("items", &self.reader.rx.borrow().len())
            .field("search", &self.search())
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl Drop for InventoryViewModel {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::{ItemFields, ItemId};
    use pantry_store::{InMemoryItemStore, ItemDocument};

    fn seeded() -> InMemoryItemStore {
        InMemoryItemStore::with_documents(vec![
            ItemDocument::new(ItemId::from_raw("b"), ItemFields::new("banana", 3.0)),
            ItemDocument::new(ItemId::from_raw("a"), ItemFields::new("apple", 2.0)),
        ])
    }

    #[tokio::test]
    async fn attach_reflects_existing_contents_sorted() {
        let store = seeded();
        let view = InventoryViewModel::attach(&store).unwrap();

        assert_eq!(view.snapshot().names(), vec!["apple", "banana"]);
        assert_eq!(view.total(), 5.0);
        assert!(view.is_attached());
    }

    #[tokio::test]
    async fn every_store_write_replaces_the_snapshot() {
        let store = seeded();
        let view = InventoryViewModel::attach(&store).unwrap();

        store.create(ItemFields::new("Cherry", 1.5)).await.unwrap();
        store.delete(&ItemId::from_raw("a")).await.unwrap();

        assert_eq!(view.snapshot().names(), vec!["banana", "Cherry"]);
        assert_eq!(view.total(), 4.5);
    }

    #[tokio::test]
    async fn search_filters_visible_items_only() {
        let store = seeded();
        let view = InventoryViewModel::attach(&store).unwrap();

        view.set_search("AN");
        let visible: Vec<_> = view.visible_items().into_iter().map(|i| i.name).collect();
        assert_eq!(visible, vec!["banana"]);
        // Total covers the full snapshot regardless of the filter.
        assert_eq!(view.total(), 5.0);

        view.set_search("");
        assert_eq!(view.visible_items().len(), 2);
    }

    #[tokio::test]
    async fn teardown_releases_subscription_and_freezes_snapshot() {
        let store = seeded();
        let view = InventoryViewModel::attach(&store).unwrap();
        assert_eq!(store.subscriber_count(), 1);

        view.teardown();
        assert_eq!(store.subscriber_count(), 0);
        assert!(!view.is_attached());

        store.create(ItemFields::new("cherry", 1.0)).await.unwrap();
        assert_eq!(view.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn dropping_the_view_unsubscribes() {
        let store = seeded();
        {
            let _view = InventoryViewModel::attach(&store).unwrap();
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn reader_observes_later_notifications() {
        let store = InMemoryItemStore::new();
        let view = InventoryViewModel::attach(&store).unwrap();
        let mut reader = view.reader();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.create(ItemFields::new("rice", 2.0)).await.unwrap();
        });

        let snap = reader.wait_for(|s| s.len() == 1).await.unwrap();
        assert_eq!(snap.names(), vec!["rice"]);
    }

    #[tokio::test]
    async fn reader_reports_release() {
        let store = InMemoryItemStore::new();
        let view = InventoryViewModel::attach(&store).unwrap();
        let mut reader = view.reader();
        view.teardown();
        // Sender dropped with the callback: no more notifications.
        while reader.changed().await {}
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_writes_leave_view_equal_to_store() {
        for round in 0..300 {
            let store = InMemoryItemStore::new();
            let view = InventoryViewModel::attach(&store).unwrap();

            let writers: Vec<_> = (0..8)
                .map(|i| {
                    let store = store.clone();
                    tokio::spawn(async move {
                        store.create(ItemFields::new(format!("item-{i}"), 1.0)).await.unwrap();
                    })
                })
                .collect();
            for w in writers {
                w.await.unwrap();
            }

            // Last notification processed is the full, newest collection.
            let expected = InventorySnapshot::from_documents(store.documents());
            assert_eq!(view.snapshot(), expected, "round {round}");
            assert_eq!(view.total(), 8.0);
        }
    }
}
