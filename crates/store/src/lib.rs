//! Remote item store contract (mechanics only).
//!
//! The item store is an external document database: it owns persistence and
//! real-time sync. This crate states the contract the rest of the workspace
//! consumes, plus an in-memory implementation for dev mode and tests.

pub mod in_memory;
pub mod store;
pub mod subscription;

pub use in_memory::InMemoryItemStore;
pub use store::{ITEMS_COLLECTION, ItemDocument, ItemStore, StoreError};
pub use subscription::{SnapshotCallback, Subscription};
