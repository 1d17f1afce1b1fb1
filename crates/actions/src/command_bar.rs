//! Command-bar navigation state machine.
//!
//! The palette is a cursor over resolved pages: drilling into a page link
//! pushes the current page onto a back stack, the synthetic back row pops
//! it, and typing filters the current page's rows. Selecting an action row
//! yields [`SelectOutcome::Invoke`]; the host dispatches it and closes the
//! palette.

use crate::context::VisibilityContext;
use crate::pages::{PageGraph, PageId, ResolvedItem};
use crate::registry::{ActionId, ActionRegistry};
use crate::state::WorkspaceSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteItem {
    Back,
    Action(ActionId),
    Page(PageId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGroup {
    pub label: &'static str,
    pub items: Vec<PaletteItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Navigated,
    Back,
    Invoke(ActionId),
}

pub struct CommandBar {
    current_page: PageId,
    back_stack: Vec<PageId>,
    search: String,
}

impl CommandBar {
    pub fn new() -> Self {
        Self {
            current_page: PageId::Root,
            back_stack: Vec::new(),
            search: String::new(),
        }
    }

    /// Return to the initial state. Called when the palette is reopened.
    pub fn reset(&mut self) {
        self.current_page = PageId::Root;
        self.back_stack.clear();
        self.search.clear();
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn type_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn backspace(&mut self) {
        self.search.pop();
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn select(&mut self, item: PaletteItem) -> SelectOutcome {
        match item {
            PaletteItem::Back => {
                if let Some(previous) = self.back_stack.pop() {
                    self.current_page = previous;
                }
                SelectOutcome::Back
            }
            PaletteItem::Page(target) => {
                self.back_stack.push(self.current_page);
                self.current_page = target;
                // Drill-down always starts the child page unfiltered.
                self.search.clear();
                SelectOutcome::Navigated
            }
            PaletteItem::Action(id) => SelectOutcome::Invoke(id),
        }
    }

    /// The rows to render: the current page resolved, non-visible actions
    /// dropped, and the rest filtered by a case-insensitive substring match
    /// against `id + resolved label`. The synthetic back row is exempt from
    /// filtering and only offered on an empty query.
    pub fn visible_groups(
        &self,
        graph: &PageGraph,
        registry: &ActionRegistry,
        ctx: &VisibilityContext,
        subject: Option<&WorkspaceSummary>,
    ) -> Vec<PaletteGroup> {
        let query = self.search.to_lowercase();
        let resolved = graph.resolve(self.current_page);

        let mut groups = Vec::with_capacity(resolved.groups.len() + 1);
        if self.search.is_empty() && self.can_go_back() {
            groups.push(PaletteGroup {
                label: "",
                items: vec![PaletteItem::Back],
            });
        }

        for group in &resolved.groups {
            let items: Vec<PaletteItem> = group
                .items
                .iter()
                .filter_map(|item| match item {
                    ResolvedItem::Action(id) => {
                        let action = registry.get(*id);
                        if !action.is_visible(ctx) {
                            return None;
                        }
                        let key =
                            format!("{} {}", id.as_str(), action.resolve_label(subject))
                                .to_lowercase();
                        key.contains(&query).then_some(PaletteItem::Action(*id))
                    }
                    ResolvedItem::Page(id) => {
                        let title = graph.get(*id).title.unwrap_or_default();
                        let key = format!("{} {}", id.as_str(), title).to_lowercase();
                        key.contains(&query).then_some(PaletteItem::Page(*id))
                    }
                })
                .collect();
            if !items.is_empty() {
                groups.push(PaletteGroup {
                    label: group.label,
                    items,
                });
            }
        }
        groups
    }
}

impl Default for CommandBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DiffState, LayoutState, WorkspaceSummary, WorkspacesState};
    use chrono::Utc;
    use uuid::Uuid;

    fn ctx_with_workspace() -> (VisibilityContext, WorkspaceSummary) {
        let workspace = WorkspaceSummary {
            id: Uuid::new_v4(),
            name: "api".to_string(),
            branch: None,
            pinned: false,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut workspaces = WorkspacesState::new();
        workspaces.set_workspaces(vec![workspace.clone()]);
        let ctx = VisibilityContext::build(
            &LayoutState::new(),
            &workspaces,
            &DiffState::new(),
        );
        (ctx, workspace)
    }

    fn flat_items(groups: &[PaletteGroup]) -> Vec<PaletteItem> {
        groups.iter().flat_map(|g| g.items.iter().copied()).collect()
    }

    #[test]
    fn test_initial_state_is_root_with_empty_stack() {
        let bar = CommandBar::new();
        assert_eq!(bar.current_page(), PageId::Root);
        assert!(!bar.can_go_back());
        assert_eq!(bar.search(), "");
    }

    #[test]
    fn test_drill_down_pushes_and_clears_search() {
        let mut bar = CommandBar::new();
        bar.type_char('v');
        assert_eq!(
            bar.select(PaletteItem::Page(PageId::ViewOptions)),
            SelectOutcome::Navigated
        );
        assert_eq!(bar.current_page(), PageId::ViewOptions);
        assert!(bar.can_go_back());
        assert_eq!(bar.search(), "");
    }

    #[test]
    fn test_back_pops_to_previous_page() {
        let mut bar = CommandBar::new();
        bar.select(PaletteItem::Page(PageId::ViewOptions));
        assert_eq!(bar.select(PaletteItem::Back), SelectOutcome::Back);
        assert_eq!(bar.current_page(), PageId::Root);
        assert!(!bar.can_go_back());
    }

    #[test]
    fn test_back_row_only_without_search_and_with_stack() {
        let graph = PageGraph::builtin();
        let registry = ActionRegistry::builtin();
        let (ctx, workspace) = ctx_with_workspace();

        let mut bar = CommandBar::new();
        let groups = bar.visible_groups(&graph, &registry, &ctx, Some(&workspace));
        assert!(!flat_items(&groups).contains(&PaletteItem::Back));

        bar.select(PaletteItem::Page(PageId::ViewOptions));
        let groups = bar.visible_groups(&graph, &registry, &ctx, Some(&workspace));
        assert_eq!(flat_items(&groups)[0], PaletteItem::Back);

        bar.type_char('d');
        let groups = bar.visible_groups(&graph, &registry, &ctx, Some(&workspace));
        assert!(!flat_items(&groups).contains(&PaletteItem::Back));
    }

    #[test]
    fn test_search_matches_id_and_label_case_insensitively() {
        let graph = PageGraph::builtin();
        let registry = ActionRegistry::builtin();
        let (ctx, workspace) = ctx_with_workspace();

        let mut bar = CommandBar::new();
        for c in "PIN".chars() {
            bar.type_char(c.to_ascii_lowercase());
        }
        let items = flat_items(&bar.visible_groups(&graph, &registry, &ctx, Some(&workspace)));
        assert!(items.contains(&PaletteItem::Action(ActionId::PinWorkspace)));
        assert!(!items.contains(&PaletteItem::Action(ActionId::OpenSettings)));
    }

    #[test]
    fn test_invisible_actions_filtered_out() {
        let graph = PageGraph::builtin();
        let registry = ActionRegistry::builtin();
        // No selected workspace, so ArchiveWorkspace is not visible.
        let ctx = VisibilityContext::build(
            &LayoutState::new(),
            &WorkspacesState::new(),
            &DiffState::new(),
        );
        let bar = CommandBar::new();
        let items = flat_items(&bar.visible_groups(&graph, &registry, &ctx, None));
        assert!(!items.contains(&PaletteItem::Action(ActionId::ArchiveWorkspace)));
        assert!(items.contains(&PaletteItem::Action(ActionId::DuplicateWorkspace)));
    }

    #[test]
    fn test_selecting_action_yields_invoke() {
        let mut bar = CommandBar::new();
        assert_eq!(
            bar.select(PaletteItem::Action(ActionId::CreateWorkspace)),
            SelectOutcome::Invoke(ActionId::CreateWorkspace)
        );
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut bar = CommandBar::new();
        bar.select(PaletteItem::Page(PageId::ViewOptions));
        bar.type_char('x');
        bar.reset();
        assert_eq!(bar.current_page(), PageId::Root);
        assert!(!bar.can_go_back());
        assert_eq!(bar.search(), "");
    }
}
