//! Live-query subscription handle.
//!
//! A subscription is a scoped resource: it is acquired by
//! `ItemStore::subscribe` and released exactly once, either explicitly via
//! `unsubscribe()` or implicitly when the handle is dropped.
//!
//! ## Usage Pattern
//!
//! ```ignore
//! let sub = store.subscribe(Box::new(|docs| {
//!     // full collection contents, unordered
//! }))?;
//! // ...
//! drop(sub); // unsubscribes
//! ```

use crate::store::ItemDocument;

/// Callback invoked with the full collection contents on every change.
///
/// May be called from whichever thread performed the write; must not block.
pub type SnapshotCallback = Box<dyn Fn(Vec<ItemDocument>) + Send + Sync + 'static>;

type Release = Box<dyn FnOnce() + Send + 'static>;

pub struct Subscription {
    release: Option<Release>,
}

impl Subscription {
    /// Wrap the store-specific release action.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Release the subscription now.
    pub fn unsubscribe(mut self) {
        self.release_once();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}
