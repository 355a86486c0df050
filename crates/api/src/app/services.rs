use std::sync::Arc;

use tracing::info;

use pantry_ai::RecipeBoard;
use pantry_core::FailurePolicy;
use pantry_inventory::{InventoryViewModel, MutationCoordinator, RecipeRefreshPolicy};
use pantry_store::{ItemStore, StoreError};

/// Everything the handlers need, shared behind one `Arc`.
///
/// The view model holds the only subscription to the store; the coordinator
/// reads through a `SnapshotReader` of that same view.
#[derive(Debug)]
pub struct AppServices {
    pub view: InventoryViewModel,
    pub coordinator: MutationCoordinator<Arc<dyn ItemStore>>,
    pub recipes: Option<Arc<RecipeBoard>>,
}

impl AppServices {
    pub fn build(
        store: Arc<dyn ItemStore>,
        recipes: Option<Arc<RecipeBoard>>,
        refresh: RecipeRefreshPolicy,
        failure_policy: FailurePolicy,
    ) -> Result<Self, StoreError> {
        let view = InventoryViewModel::attach(&store)?;

        let mut coordinator = MutationCoordinator::new(store, view.reader())
            .with_refresh_policy(refresh)
            .with_failure_policy(failure_policy);
        if let Some(board) = &recipes {
            coordinator = coordinator.with_recipes(board.clone());
        }

        info!(
            recipes_enabled = recipes.is_some(),
            refresh = refresh.as_str(),
            failures = failure_policy.as_str(),
            "api services ready"
        );

        Ok(Self {
            view,
            coordinator,
            recipes,
        })
    }
}
