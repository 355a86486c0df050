//! Recipe board: runs suggestion jobs and holds the displayed recipe.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, error, info};

use pantry_core::FailurePolicy;

use crate::job::RecipeJob;
use crate::result::{Recipe, SuggestionError, SuggestionErrorKind};
use crate::service::RecipeService;

/// Holds the currently displayed recipe and refreshes it on demand.
///
/// Failures never clear the displayed recipe. Whether they are also returned
/// to the caller is decided by the board's `FailurePolicy`.
///
/// Requests are numbered when issued; a completion only replaces the
/// displayed recipe if its request is newer than the one that produced it.
pub struct RecipeBoard {
    service: Arc<dyn RecipeService>,
    issued: AtomicU64,
    /// Displayed recipe and the number of the request that produced it.
    current: RwLock<(u64, Option<Recipe>)>,
    policy: FailurePolicy,
}

impl RecipeBoard {
    pub fn new(service: Arc<dyn RecipeService>) -> Self {
        Self {
            service,
            issued: AtomicU64::new(0),
            current: RwLock::new((0, None)),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// The recipe currently displayed, if any.
    pub fn current(&self) -> Option<Recipe> {
        self.current.read().ok().and_then(|shown| shown.1.clone())
    }

    /// Ask for a recipe using `ingredients` and display it.
    ///
    /// Returns the recipe now displayed. Under `Suppress`, a failure returns
    /// the previously displayed recipe (possibly `None`).
    pub async fn refresh(&self, ingredients: Vec<String>) -> Result<Option<Recipe>, SuggestionError> {
        self.run(RecipeJob::new(ingredients)).await
    }

    pub async fn run(&self, job: RecipeJob) -> Result<Option<Recipe>, SuggestionError> {
        let request = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let prompt = job.prompt();
        match self.service.complete(&prompt).await {
            Ok(text) => {
                let recipe = Recipe::new(text, job.into_ingredients());
                let displayed = match self.current.write() {
                    Ok(mut shown) if request > shown.0 => {
                        *shown = (request, Some(recipe.clone()));
                        true
                    }
                    _ => false,
                };
                if !displayed {
                    debug!(request, "recipe from superseded request discarded");
                    return Ok(self.current());
                }
                info!(request, ingredients = recipe.ingredients.len(), "recipe suggestion updated");
                Ok(Some(recipe))
            }
            Err(e) => {
                log_suggestion_error(&e);
                if self.policy.surfaces() {
                    Err(e)
                } else {
                    Ok(self.current())
                }
            }
        }
    }
}

impl core::fmt::Debug for RecipeBoard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecipeBoard")
            .field("current", &self.current)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn log_suggestion_error(e: &SuggestionError) {
    match e.kind {
        SuggestionErrorKind::Quota => error!(
            error = %e,
            "recipe suggestion failed: API quota exceeded; check plan and billing details"
        ),
        SuggestionErrorKind::ModelNotFound => error!(
            error = %e,
            "recipe suggestion failed: requested model is deprecated or does not exist"
        ),
        SuggestionErrorKind::Other => error!(error = %e, "recipe suggestion failed"),
    }
}
