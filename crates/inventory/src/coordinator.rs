//! Mutation coordinator: user intents → store writes.
//!
//! ## Pipeline
//!
//! ```text
//! intent ─▶ resolve_* (pure) ─▶ StoreOp ─▶ ItemStore write ─▶ (subscription updates the view)
//!                                                   └──────▶ recipe refresh (per policy)
//! ```
//!
//! The coordinator never patches the local snapshot. It reads the snapshot to
//! apply the merge-by-name rule, writes to the store, and waits for the live
//! subscription to bring the result back.
//!
//! ## Merge-by-name
//!
//! Adding a name that already exists (case-insensitive, trimmed) overwrites
//! that item with `old + new` quantity instead of creating a second document.

use core::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use pantry_ai::RecipeBoard;
use pantry_core::{
    FailurePolicy, Item, ItemFields, ItemId, Quantity, ValidationError, ValidationResult,
    parse_quantity,
};
use pantry_store::{ItemStore, StoreError};

use crate::snapshot::InventorySnapshot;
use crate::view_model::SnapshotReader;

/// A single write against the item store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Create(ItemFields),
    Set { id: ItemId, fields: ItemFields },
    Delete { id: ItemId },
}

impl StoreOp {
    /// Snapshot as it would look once this op is reflected by the store.
    ///
    /// `id` is the id the op affected (store-assigned for `Create`).
    pub fn project(&self, snapshot: &InventorySnapshot, id: &ItemId) -> InventorySnapshot {
        let mut items = snapshot.items().to_vec();
        match self {
            StoreOp::Create(fields) => items.push(Item::new(id.clone(), fields.clone())),
            StoreOp::Set { fields, .. } => match items.iter().position(|i| &i.id == id) {
                Some(idx) => items[idx] = Item::new(id.clone(), fields.clone()),
                None => items.push(Item::new(id.clone(), fields.clone())),
            },
            StoreOp::Delete { .. } => items.retain(|i| &i.id != id),
        }
        InventorySnapshot::from_items(items)
    }
}

/// Resolve an add against the current items (merge-by-name).
pub fn resolve_add(existing: &[Item], name: &str, quantity: Quantity) -> ValidationResult<StoreOp> {
    let fields = ItemFields::from_input(name, quantity)?;
    if quantity == 0.0 {
        return Err(ValidationError::ZeroQuantity);
    }

    match existing.iter().find(|i| i.is_named(&fields.name)) {
        Some(item) => Ok(StoreOp::Set {
            id: item.id.clone(),
            fields: ItemFields::new(item.name.clone(), item.quantity + quantity),
        }),
        None => Ok(StoreOp::Create(fields)),
    }
}

/// Validate raw add input, then resolve it.
///
/// Checks run in order: empty name, unparsable quantity, zero quantity.
pub fn resolve_add_input(existing: &[Item], name: &str, quantity_text: &str) -> ValidationResult<StoreOp> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let quantity = parse_quantity(quantity_text)?;
    resolve_add(existing, name, quantity)
}

/// Resolve an edit of item `id`. A quantity of exactly zero becomes a delete.
pub fn resolve_update(id: &ItemId, name: &str, quantity_text: &str) -> ValidationResult<StoreOp> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let quantity = parse_quantity(quantity_text)?;
    if quantity == 0.0 {
        return Ok(StoreOp::Delete { id: id.clone() });
    }
    Ok(StoreOp::Set {
        id: id.clone(),
        fields: ItemFields::from_input(name, quantity)?,
    })
}

/// What a mutation did (or why it did nothing).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationOutcome {
    Created { id: ItemId },
    Merged { id: ItemId, quantity: Quantity },
    Updated { id: ItemId },
    Deleted { id: ItemId },
    /// Input failed validation; nothing was written.
    Ignored { code: String, reason: String },
    /// The store write failed; treated as not having happened.
    Failed { reason: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which item names feed the recipe refresh that follows a successful mutation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeRefreshPolicy {
    /// Do not refresh after mutations.
    Never,
    /// Names from the local snapshot when the write returns. The subscription
    /// may not have delivered the write yet, so this can be stale.
    #[default]
    LocalSnapshot,
    /// Names from the pre-write snapshot with the write applied locally.
    Projected,
}

impl RecipeRefreshPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeRefreshPolicy::Never => "never",
            RecipeRefreshPolicy::LocalSnapshot => "local",
            RecipeRefreshPolicy::Projected => "projected",
        }
    }
}

impl FromStr for RecipeRefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(RecipeRefreshPolicy::Never),
            "local" | "local_snapshot" => Ok(RecipeRefreshPolicy::LocalSnapshot),
            "projected" => Ok(RecipeRefreshPolicy::Projected),
            other => Err(format!(
                "unknown recipe refresh policy {other:?} (expected one of: never, local, projected)"
            )),
        }
    }
}

/// Translates add / update / delete intents into item store writes.
pub struct MutationCoordinator<S> {
    store: S,
    reader: SnapshotReader,
    recipes: Option<Arc<RecipeBoard>>,
    refresh: RecipeRefreshPolicy,
    failures: FailurePolicy,
}

impl<S> MutationCoordinator<S>
where
    S: ItemStore,
{
    pub fn new(store: S, reader: SnapshotReader) -> Self {
        Self {
            store,
            reader,
            recipes: None,
            refresh: RecipeRefreshPolicy::default(),
            failures: FailurePolicy::default(),
        }
    }

    pub fn with_recipes(mut self, board: Arc<RecipeBoard>) -> Self {
        self.recipes = Some(board);
        self
    }

    pub fn with_refresh_policy(mut self, refresh: RecipeRefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_failure_policy(mut self, failures: FailurePolicy) -> Self {
        self.failures = failures;
        self
    }

    /// Add `quantity_text` of `name`, merging into an existing item of the same name.
    pub async fn add(&self, name: &str, quantity_text: &str) -> Result<MutationOutcome, MutationError> {
        let before = self.reader.current();
        let op = match resolve_add_input(before.items(), name, quantity_text) {
            Ok(op) => op,
            Err(e) => return self.ignored("add", e),
        };

        let id = match self.write(&op).await {
            Ok(id) => id,
            Err(e) => return self.failed("add", e),
        };

        let outcome = match &op {
            StoreOp::Set { fields, .. } => {
                info!(item_id = %id, name = %fields.name, quantity = fields.quantity, "item quantity merged");
                MutationOutcome::Merged {
                    id: id.clone(),
                    quantity: fields.quantity,
                }
            }
            StoreOp::Create(fields) => {
                info!(item_id = %id, name = %fields.name, quantity = fields.quantity, "item created");
                MutationOutcome::Created { id: id.clone() }
            }
            StoreOp::Delete { .. } => MutationOutcome::Deleted { id: id.clone() },
        };

        self.refresh_recipe(&op, &id, &before).await;
        Ok(outcome)
    }

    /// Replace name and quantity of item `id`. A zero quantity deletes the item.
    pub async fn update(
        &self,
        id: &ItemId,
        name: &str,
        quantity_text: &str,
    ) -> Result<MutationOutcome, MutationError> {
        let op = match resolve_update(id, name, quantity_text) {
            Ok(op) => op,
            Err(e) => return self.ignored("update", e),
        };

        if let StoreOp::Delete { id } = &op {
            debug!(item_id = %id, "update to zero quantity; deleting item");
            return self.delete(id).await;
        }

        let before = self.reader.current();
        if let Err(e) = self.write(&op).await {
            return self.failed("update", e);
        }
        info!(item_id = %id, "item updated");

        self.refresh_recipe(&op, id, &before).await;
        Ok(MutationOutcome::Updated { id: id.clone() })
    }

    /// Remove item `id`.
    pub async fn delete(&self, id: &ItemId) -> Result<MutationOutcome, MutationError> {
        let op = StoreOp::Delete { id: id.clone() };
        let before = self.reader.current();
        if let Err(e) = self.write(&op).await {
            return self.failed("delete", e);
        }
        info!(item_id = %id, "item deleted");

        self.refresh_recipe(&op, id, &before).await;
        Ok(MutationOutcome::Deleted { id: id.clone() })
    }

    async fn write(&self, op: &StoreOp) -> Result<ItemId, StoreError> {
        match op {
            StoreOp::Create(fields) => self.store.create(fields.clone()).await,
            StoreOp::Set { id, fields } => {
                self.store.set(id, fields.clone()).await?;
                Ok(id.clone())
            }
            StoreOp::Delete { id } => {
                self.store.delete(id).await?;
                Ok(id.clone())
            }
        }
    }

    async fn refresh_recipe(&self, op: &StoreOp, id: &ItemId, before: &InventorySnapshot) {
        let Some(board) = &self.recipes else {
            return;
        };

        let names = match self.refresh {
            RecipeRefreshPolicy::Never => return,
            RecipeRefreshPolicy::LocalSnapshot => self.reader.current().names(),
            RecipeRefreshPolicy::Projected => op.project(before, id).names(),
        };

        if let Err(e) = board.refresh(names).await {
            debug!(error = %e, "recipe refresh after mutation failed");
        }
    }

    fn ignored(&self, action: &'static str, e: ValidationError) -> Result<MutationOutcome, MutationError> {
        debug!(action, code = e.code(), "mutation input rejected");
        if self.failures.surfaces() {
            return Err(e.into());
        }
        Ok(MutationOutcome::Ignored {
            code: e.code().to_string(),
            reason: e.to_string(),
        })
    }

    fn failed(&self, action: &'static str, e: StoreError) -> Result<MutationOutcome, MutationError> {
        warn!(action, error = %e, "item store write failed");
        if self.failures.surfaces() {
            return Err(e.into());
        }
        Ok(MutationOutcome::Failed {
            reason: e.to_string(),
        })
    }
}

impl<S> core::fmt::Debug for MutationCoordinator<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("recipes", &self.recipes.is_some())
            .field("refresh", &self.refresh)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}
