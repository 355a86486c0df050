//! Item store abstraction.
//!
//! ## Contract
//!
//! - `create` writes a new document and returns the store-assigned id.
//! - `set` overwrites the full document at `id` (creating it if absent).
//! - `delete` removes the document at `id`; deleting a missing id is not an error.
//! - `subscribe` registers a live query over the whole collection. The callback
//!   receives the **full** contents of the collection on every change, in no
//!   particular order. Dropping the returned `Subscription` unsubscribes.
//!
//! The store does not enforce name uniqueness; that is the mutation layer's job.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use pantry_core::{Item, ItemFields, ItemId};

use crate::subscription::{SnapshotCallback, Subscription};

/// Name of the single logical collection holding item documents.
pub const ITEMS_COLLECTION: &str = "items";

/// One document as delivered by a live query.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDocument {
    pub id: ItemId,
    pub fields: ItemFields,
}

impl ItemDocument {
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        Self { id, fields }
    }
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Item::new(doc.id, doc.fields)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or did not answer.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (permissions, quota, malformed document).
    #[error("store rejected operation: {0}")]
    Rejected(String),

    /// Internal lock poisoning (in-process stores only).
    #[error("store state poisoned")]
    Poisoned,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create(&self, fields: ItemFields) -> Result<ItemId, StoreError>;

    async fn set(&self, id: &ItemId, fields: ItemFields) -> Result<(), StoreError>;

    async fn delete(&self, id: &ItemId) -> Result<(), StoreError>;

    fn subscribe(&self, on_snapshot: SnapshotCallback) -> Result<Subscription, StoreError>;
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn create(&self, fields: ItemFields) -> Result<ItemId, StoreError> {
        (**self).create(fields).await
    }

    async fn set(&self, id: &ItemId, fields: ItemFields) -> Result<(), StoreError> {
        (**self).set(id, fields).await
    }

    async fn delete(&self, id: &ItemId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    fn subscribe(&self, on_snapshot: SnapshotCallback) -> Result<Subscription, StoreError> {
        (**self).subscribe(on_snapshot)
    }
}
