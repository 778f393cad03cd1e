use std::collections::BTreeMap;
use std::sync::Arc;

use super::ActionDef;
use crate::state::ActionId;

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate action id {0}")]
    DuplicateId(ActionId),
}

/// Read-only set of action definitions, keyed by id.
///
/// Definitions are handed out as `Arc`s so queue entries can hold on to them
/// without borrowing the catalog.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    actions: BTreeMap<ActionId, Arc<ActionDef>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_defs(defs: impl IntoIterator<Item = ActionDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, def: ActionDef) -> Result<(), CatalogError> {
        if self.actions.contains_key(&def.id) {
            return Err(CatalogError::DuplicateId(def.id));
        }
        self.actions.insert(def.id, Arc::new(def));
        Ok(())
    }

    pub fn get(&self, id: ActionId) -> Option<&Arc<ActionDef>> {
        self.actions.get(&id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<ActionDef>> {
        self.actions
            .values()
            .find(|def| def.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ActionDef>> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
