//! Inventory reconciliation and view derivation.
//!
//! This crate turns the item store's live query into a displayable snapshot
//! (sorted list, total, search filter) and turns user intents into store
//! writes. Local state is never patched directly: every change reaches the
//! view through the store's subscription.

pub mod coordinator;
pub mod snapshot;
pub mod view_model;

pub use coordinator::{
    MutationCoordinator, MutationError, MutationOutcome, RecipeRefreshPolicy, StoreOp,
    resolve_add, resolve_add_input, resolve_update,
};
pub use snapshot::{InventorySnapshot, compare_names, matches_search};
pub use view_model::{InventoryViewModel, SnapshotReader};
