//! `pantry-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! item identity, item fields, quantity parsing, and the failure policy shared
//! by the mutation and suggestion layers.

pub mod error;
pub mod id;
pub mod item;
pub mod policy;
pub mod quantity;

pub use error::{ValidationError, ValidationResult};
pub use id::ItemId;
pub use item::{Item, ItemFields, name_key, names_match};
pub use policy::FailurePolicy;
pub use quantity::{Quantity, parse_quantity};
