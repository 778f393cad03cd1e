//! Action content types and the catalog that serves them.

mod catalog;
mod types;

pub use catalog::{ActionCatalog, CatalogError};
pub use types::{
    ActionCategory, ActionDef, ActionKind, Element, ItemEffect, TargetKind, TargetMask,
};
