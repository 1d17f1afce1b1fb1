//! Flat navbar item lists and divider compaction.

use crate::context::VisibilityContext;
use crate::registry::{ActionId, ActionRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarItem {
    Action(ActionId),
    Divider,
}

/// Drop non-visible actions, then compact dividers: none at either end, and
/// a run of adjacent dividers disappears entirely rather than collapsing to
/// one. Dividers separate groups of visible actions; once a whole group is
/// hidden, the separation it sat between is gone too.
pub fn compact(
    items: &[NavbarItem],
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
) -> Vec<NavbarItem> {
    let visible: Vec<NavbarItem> = items
        .iter()
        .filter(|item| match item {
            NavbarItem::Action(id) => registry.get(*id).is_visible(ctx),
            NavbarItem::Divider => true,
        })
        .copied()
        .collect();

    let mut out = Vec::with_capacity(visible.len());
    let mut i = 0;
    while i < visible.len() {
        if visible[i] == NavbarItem::Divider {
            let run_end = visible[i..]
                .iter()
                .position(|item| *item != NavbarItem::Divider)
                .map_or(visible.len(), |offset| i + offset);
            if run_end - i == 1 {
                out.push(NavbarItem::Divider);
            }
            i = run_end;
        } else {
            out.push(visible[i]);
            i += 1;
        }
    }

    if out.first() == Some(&NavbarItem::Divider) {
        out.remove(0);
    }
    if out.last() == Some(&NavbarItem::Divider) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DiffState, LayoutState, WorkspacesState};

    use NavbarItem::{Action, Divider};

    // ArchiveWorkspace is only visible with a selected workspace, which makes
    // it the hidden item in these fixtures.
    fn ctx_without_workspace() -> VisibilityContext {
        VisibilityContext::build(
            &LayoutState::new(),
            &WorkspacesState::new(),
            &DiffState::new(),
        )
    }

    #[test]
    fn test_hidden_action_collapses_surrounding_dividers() {
        let registry = ActionRegistry::builtin();
        let ctx = ctx_without_workspace();
        let items = [
            Divider,
            Action(ActionId::CreateWorkspace),
            Divider,
            Divider,
            Action(ActionId::ArchiveWorkspace),
            Divider,
        ];
        assert_eq!(
            compact(&items, &registry, &ctx),
            vec![Action(ActionId::CreateWorkspace)]
        );
    }

    #[test]
    fn test_single_divider_between_visible_actions_survives() {
        let registry = ActionRegistry::builtin();
        let ctx = ctx_without_workspace();
        let items = [
            Action(ActionId::CreateWorkspace),
            Divider,
            Action(ActionId::OpenSettings),
        ];
        assert_eq!(compact(&items, &registry, &ctx), items.to_vec());
    }

    #[test]
    fn test_all_hidden_yields_empty_list() {
        let registry = ActionRegistry::builtin();
        let ctx = ctx_without_workspace();
        let items = [Divider, Action(ActionId::ArchiveWorkspace), Divider];
        assert!(compact(&items, &registry, &ctx).is_empty());
    }
}
