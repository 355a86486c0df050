//! `pantry-ai`
//!
//! **Responsibility:** Optional recipe-suggestion subsystem boundary.
//!
//! This crate is intentionally **not** part of the inventory model:
//! - It must not depend on the item store.
//! - It must not mutate inventory state.
//! - It turns a list of ingredient names into a displayed recipe, and keeps the
//!   previous recipe when a suggestion fails.

pub mod board;
pub mod job;
pub mod result;
pub mod service;

pub use board::RecipeBoard;
pub use job::RecipeJob;
pub use result::{Recipe, SuggestionError, SuggestionErrorKind};
pub use service::RecipeService;
