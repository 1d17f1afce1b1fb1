//! Per-render snapshot of cross-cutting UI state.
//!
//! Every predicate in the action catalog takes a [`VisibilityContext`] and
//! nothing else. The context is rebuilt from the live state stores on every
//! render pass and carries only derived primitives, never references back
//! into the stores, so predicates stay pure and can be re-evaluated at any
//! point in a render without observing a mutation.

use crate::state::{DiffState, DiffViewMode, LayoutState, WorkspacesState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityContext {
    pub sidebar_open: bool,
    pub has_workspace: bool,
    pub workspace_pinned: bool,
    pub workspace_archived: bool,
    pub workspace_count: usize,
    pub diff_view_mode: DiffViewMode,
    pub expanded_diffs: usize,
    pub diff_count: usize,
}

impl VisibilityContext {
    pub fn build(layout: &LayoutState, workspaces: &WorkspacesState, diffs: &DiffState) -> Self {
        let selected = workspaces.selected();
        Self {
            sidebar_open: layout.sidebar_open,
            has_workspace: selected.is_some(),
            workspace_pinned: selected.is_some_and(|w| w.pinned),
            workspace_archived: selected.is_some_and(|w| w.archived),
            workspace_count: workspaces.workspaces.len(),
            diff_view_mode: diffs.view_mode,
            expanded_diffs: diffs.expanded,
            diff_count: diffs.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WorkspaceSummary;
    use chrono::Utc;
    use uuid::Uuid;

    fn stores() -> (LayoutState, WorkspacesState, DiffState) {
        let mut workspaces = WorkspacesState::new();
        workspaces.set_workspaces(vec![WorkspaceSummary {
            id: Uuid::new_v4(),
            name: "api".to_string(),
            branch: Some("main".to_string()),
            pinned: true,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }]);
        let diffs = DiffState {
            view_mode: DiffViewMode::Split,
            expanded: 2,
            total: 5,
        };
        (LayoutState::new(), workspaces, diffs)
    }

    #[test]
    fn test_build_derives_primitives_only() {
        let (layout, workspaces, diffs) = stores();
        let ctx = VisibilityContext::build(&layout, &workspaces, &diffs);
        assert!(ctx.has_workspace);
        assert!(ctx.workspace_pinned);
        assert!(!ctx.workspace_archived);
        assert_eq!(ctx.workspace_count, 1);
        assert_eq!(ctx.diff_view_mode, DiffViewMode::Split);
        assert_eq!(ctx.expanded_diffs, 2);
        assert_eq!(ctx.diff_count, 5);
    }

    #[test]
    fn test_build_is_deterministic_over_equal_stores() {
        // Two structurally identical snapshots, built independently.
        let (layout_a, workspaces_a, diffs_a) = stores();
        let (layout_b, workspaces_b, diffs_b) = stores();
        let a = VisibilityContext::build(&layout_a, &workspaces_a, &diffs_a);
        let b = VisibilityContext::build(&layout_b, &workspaces_b, &diffs_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_without_selection() {
        let layout = LayoutState::new();
        let workspaces = WorkspacesState::new();
        let diffs = DiffState::new();
        let ctx = VisibilityContext::build(&layout, &workspaces, &diffs);
        assert!(!ctx.has_workspace);
        assert!(!ctx.workspace_pinned);
        assert!(!ctx.workspace_archived);
    }
}
