//! Shortcut table derived from the catalog.
//!
//! The framework only declares chords; enforcement of uniqueness across
//! simultaneously-visible actions is the host's job, via [`conflicts`] at
//! startup and in tests.

use std::collections::BTreeMap;

use crate::context::VisibilityContext;
use crate::registry::{ActionId, ActionRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub chord: &'static str,
    pub action: ActionId,
}

/// Chord bindings for every action visible in the given context.
pub fn bindings(registry: &ActionRegistry, ctx: &VisibilityContext) -> Vec<ShortcutBinding> {
    registry
        .iter()
        .filter(|action| action.is_visible(ctx))
        .filter_map(|action| {
            action.shortcut.map(|chord| ShortcutBinding {
                chord,
                action: action.id,
            })
        })
        .collect()
}

/// Chords claimed by more than one visible action in the given context.
pub fn conflicts(
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
) -> Vec<(&'static str, Vec<ActionId>)> {
    let mut by_chord: BTreeMap<&'static str, Vec<ActionId>> = BTreeMap::new();
    for binding in bindings(registry, ctx) {
        by_chord.entry(binding.chord).or_default().push(binding.action);
    }
    by_chord
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DiffState, LayoutState, WorkspaceSummary, WorkspacesState};
    use chrono::Utc;
    use uuid::Uuid;

    fn ctx_with_workspace() -> VisibilityContext {
        let mut workspaces = WorkspacesState::new();
        workspaces.set_workspaces(vec![WorkspaceSummary {
            id: Uuid::new_v4(),
            name: "api".to_string(),
            branch: None,
            pinned: false,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }]);
        VisibilityContext::build(&LayoutState::new(), &workspaces, &DiffState::new())
    }

    #[test]
    fn test_no_conflicts_with_all_actions_visible() {
        let registry = ActionRegistry::builtin();
        assert!(conflicts(&registry, &ctx_with_workspace()).is_empty());
    }

    #[test]
    fn test_bindings_drop_hidden_actions() {
        let registry = ActionRegistry::builtin();
        let ctx = VisibilityContext::build(
            &LayoutState::new(),
            &WorkspacesState::new(),
            &DiffState::new(),
        );
        let bound: Vec<ActionId> = bindings(&registry, &ctx).iter().map(|b| b.action).collect();
        assert!(!bound.contains(&ActionId::ArchiveWorkspace));
        assert!(bound.contains(&ActionId::CreateWorkspace));
    }
}
