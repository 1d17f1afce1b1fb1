use std::collections::HashSet;

use super::catalog;
use super::definition::{ActionDefinition, ActionId};
use crate::pages::ConfigError;

/// Canonical map of action id to definition.
///
/// The registry is closed and static: the built-in catalog is the only
/// source of definitions, nothing is registered at runtime, and looking up
/// an id that is missing from the catalog is a programmer error that panics
/// rather than silently rendering nothing.
#[derive(Clone, Copy)]
pub struct ActionRegistry {
    actions: &'static [ActionDefinition],
}

impl ActionRegistry {
    pub fn builtin() -> Self {
        Self {
            actions: catalog::catalog(),
        }
    }

    pub fn get(&self, id: ActionId) -> &'static ActionDefinition {
        self.actions
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("action `{}` is not in the catalog", id.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ActionDefinition> {
        self.actions.iter()
    }

    /// Startup self-check: every [`ActionId`] is defined exactly once.
    pub fn self_check(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for action in self.actions {
            if !seen.insert(action.id) {
                return Err(ConfigError::DuplicateActionId(action.id.as_str()));
            }
        }
        for id in ActionId::ALL {
            if !seen.contains(&id) {
                return Err(ConfigError::MissingActionId(id.as_str()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_passes_self_check() {
        ActionRegistry::builtin().self_check().unwrap();
    }

    #[test]
    fn test_action_ids_pairwise_unique() {
        let registry = ActionRegistry::builtin();
        let ids: Vec<&str> = registry.iter().map(|a| a.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_every_id_resolvable() {
        let registry = ActionRegistry::builtin();
        for id in ActionId::ALL {
            assert_eq!(registry.get(id).id, id);
        }
    }
}
