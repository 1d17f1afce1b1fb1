//! Built-in catalog: every invocable operation, the command-bar page table,
//! and the default navbar layout. All of it is static configuration; nothing
//! here is registered or mutated at runtime.

use super::definition::{
    ActionDefinition, ActionExec, ActionIcon, ActionId, ActionLabel, ActionVariant, Icon,
};
use crate::pages::{Group, GroupItem, Page, PageId};
use crate::navbar::NavbarItem;
use crate::state::DiffViewMode;

static CATALOG: [ActionDefinition; 11] = [
    ActionDefinition {
        id: ActionId::CreateWorkspace,
        label: ActionLabel::Static("New Workspace"),
        icon: ActionIcon::Static(Icon::Plus),
        shortcut: Some("c"),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Global(handlers::create_workspace),
    },
    ActionDefinition {
        id: ActionId::OpenSettings,
        label: ActionLabel::Static("Settings"),
        icon: ActionIcon::Static(Icon::Gear),
        shortcut: Some(","),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Global(handlers::open_settings),
    },
    ActionDefinition {
        id: ActionId::ToggleSidebar,
        label: ActionLabel::Static("Toggle Sidebar"),
        icon: ActionIcon::Static(Icon::Sidebar),
        shortcut: Some("b"),
        variant: ActionVariant::Default,
        visible: None,
        active: Some(|ctx| ctx.sidebar_open),
        enabled: None,
        tooltip: None,
        exec: ActionExec::Global(handlers::toggle_sidebar),
    },
    ActionDefinition {
        id: ActionId::ToggleDiffLayout,
        label: ActionLabel::Static("Toggle Diff Layout"),
        // Icon advertises the layout the toggle switches to; no icon at all
        // when the current view has no diffs.
        icon: ActionIcon::Resolve(|ctx| {
            if ctx.diff_count == 0 {
                return None;
            }
            Some(match ctx.diff_view_mode {
                DiffViewMode::Unified => Icon::Columns,
                DiffViewMode::Split => Icon::Rows,
            })
        }),
        shortcut: Some("v"),
        variant: ActionVariant::Default,
        visible: None,
        active: Some(|ctx| ctx.diff_view_mode == DiffViewMode::Split),
        enabled: Some(|ctx| ctx.diff_count > 0),
        tooltip: Some(|ctx| {
            match ctx.diff_view_mode {
                DiffViewMode::Unified => "Switch to split diff layout",
                DiffViewMode::Split => "Switch to unified diff layout",
            }
            .to_string()
        }),
        exec: ActionExec::Global(handlers::toggle_diff_layout),
    },
    ActionDefinition {
        id: ActionId::CollapseAllDiffs,
        label: ActionLabel::Static("Collapse All Diffs"),
        icon: ActionIcon::Static(Icon::Collapse),
        shortcut: Some("z"),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: Some(|ctx| ctx.expanded_diffs > 0),
        tooltip: Some(|ctx| format!("Collapse {} expanded diffs", ctx.expanded_diffs)),
        exec: ActionExec::Global(handlers::collapse_all_diffs),
    },
    ActionDefinition {
        id: ActionId::ExpandAllDiffs,
        label: ActionLabel::Static("Expand All Diffs"),
        icon: ActionIcon::Static(Icon::Expand),
        shortcut: Some("Z"),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: Some(|ctx| ctx.expanded_diffs < ctx.diff_count),
        tooltip: None,
        exec: ActionExec::Global(handlers::expand_all_diffs),
    },
    ActionDefinition {
        id: ActionId::OpenCommandBar,
        label: ActionLabel::Static("Command Bar"),
        icon: ActionIcon::Static(Icon::Command),
        shortcut: Some("mod+k"),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Global(handlers::open_command_bar),
    },
    ActionDefinition {
        id: ActionId::DuplicateWorkspace,
        label: ActionLabel::Static("Duplicate"),
        icon: ActionIcon::Static(Icon::Copy),
        shortcut: Some("y"),
        variant: ActionVariant::Default,
        visible: None,
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Workspace(handlers::duplicate_workspace),
    },
    ActionDefinition {
        id: ActionId::PinWorkspace,
        label: ActionLabel::FromSubject(|subject| {
            match subject {
                Some(w) if w.pinned => "Unpin",
                _ => "Pin",
            }
            .to_string()
        }),
        icon: ActionIcon::Static(Icon::Pin),
        shortcut: Some("p"),
        variant: ActionVariant::Default,
        visible: None,
        active: Some(|ctx| ctx.workspace_pinned),
        enabled: None,
        tooltip: None,
        exec: ActionExec::Workspace(handlers::pin_workspace),
    },
    ActionDefinition {
        id: ActionId::ArchiveWorkspace,
        label: ActionLabel::FromSubject(|subject| {
            match subject {
                Some(w) if w.archived => "Unarchive",
                _ => "Archive",
            }
            .to_string()
        }),
        icon: ActionIcon::Static(Icon::Archive),
        shortcut: Some("a"),
        variant: ActionVariant::Default,
        visible: Some(|ctx| ctx.has_workspace),
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Workspace(handlers::archive_workspace),
    },
    ActionDefinition {
        id: ActionId::DeleteWorkspace,
        label: ActionLabel::Static("Delete"),
        icon: ActionIcon::Static(Icon::Trash),
        shortcut: Some("d"),
        variant: ActionVariant::Destructive,
        visible: None,
        active: None,
        enabled: None,
        tooltip: None,
        exec: ActionExec::Workspace(handlers::delete_workspace),
    },
];

pub fn catalog() -> &'static [ActionDefinition] {
    &CATALOG
}

static PAGES: [Page; 3] = [
    Page {
        id: PageId::Root,
        title: Some("Commands"),
        parent: None,
        groups: &[
            Group {
                label: "Workspace",
                items: &[GroupItem::ChildPages(PageId::WorkspaceActions)],
            },
            Group {
                label: "View",
                items: &[GroupItem::Page(PageId::ViewOptions)],
            },
            Group {
                label: "General",
                items: &[
                    GroupItem::Action(ActionId::CreateWorkspace),
                    GroupItem::Action(ActionId::OpenSettings),
                ],
            },
        ],
    },
    Page {
        id: PageId::WorkspaceActions,
        title: Some("Workspace"),
        parent: Some(PageId::Root),
        groups: &[Group {
            label: "Workspace",
            items: &[
                GroupItem::Action(ActionId::DuplicateWorkspace),
                GroupItem::Action(ActionId::PinWorkspace),
                GroupItem::Action(ActionId::ArchiveWorkspace),
                GroupItem::Action(ActionId::DeleteWorkspace),
            ],
        }],
    },
    Page {
        id: PageId::ViewOptions,
        title: Some("View"),
        parent: Some(PageId::Root),
        groups: &[
            Group {
                label: "Layout",
                items: &[
                    GroupItem::Action(ActionId::ToggleSidebar),
                    GroupItem::Action(ActionId::ToggleDiffLayout),
                ],
            },
            Group {
                label: "Diffs",
                items: &[
                    GroupItem::Action(ActionId::CollapseAllDiffs),
                    GroupItem::Action(ActionId::ExpandAllDiffs),
                ],
            },
        ],
    },
];

pub fn pages() -> &'static [Page] {
    &PAGES
}

static NAVBAR: [NavbarItem; 10] = [
    NavbarItem::Action(ActionId::CreateWorkspace),
    NavbarItem::Divider,
    NavbarItem::Action(ActionId::ToggleSidebar),
    NavbarItem::Action(ActionId::ToggleDiffLayout),
    NavbarItem::Action(ActionId::CollapseAllDiffs),
    NavbarItem::Action(ActionId::ExpandAllDiffs),
    NavbarItem::Divider,
    NavbarItem::Action(ActionId::ArchiveWorkspace),
    NavbarItem::Action(ActionId::OpenCommandBar),
    NavbarItem::Action(ActionId::OpenSettings),
];

pub fn default_navbar() -> &'static [NavbarItem] {
    &NAVBAR
}

mod handlers {
    use futures_util::future::BoxFuture;
    use tracing::{info, warn};

    use crate::collab::{
        Confirmation, ConfirmRequest, CreateWorkspaceRequest, ExecutionEnv, UiIntent,
        UpdateWorkspaceRequest, workspace_keys,
    };
    use crate::context::VisibilityContext;
    use crate::registry::definition::ActionError;
    use crate::state::WorkspaceId;

    type ExecResult<'a> = BoxFuture<'a, Result<(), ActionError>>;

    pub(super) fn create_workspace<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            let create = CreateWorkspaceRequest {
                name: "Untitled workspace".to_string(),
                branch: None,
            };
            match env.api.create_workspace(create).await {
                Ok(workspace) => {
                    info!(workspace = %workspace.id, "created workspace");
                    env.cache.invalidate(&workspace_keys::all());
                }
                Err(err) => {
                    warn!("create workspace failed: {err}");
                    env.errors.report(err.message);
                }
            }
            Ok(())
        })
    }

    pub(super) fn open_settings<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents.send(UiIntent::OpenSettings);
            Ok(())
        })
    }

    pub(super) fn toggle_sidebar<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents.send(UiIntent::ToggleSidebar);
            Ok(())
        })
    }

    pub(super) fn toggle_diff_layout<'a>(
        env: &'a ExecutionEnv,
        ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents
                .send(UiIntent::SetDiffViewMode(ctx.diff_view_mode.toggled()));
            Ok(())
        })
    }

    pub(super) fn collapse_all_diffs<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents.send(UiIntent::CollapseAllDiffs);
            Ok(())
        })
    }

    pub(super) fn expand_all_diffs<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents.send(UiIntent::ExpandAllDiffs);
            Ok(())
        })
    }

    pub(super) fn open_command_bar<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            env.intents.send(UiIntent::OpenCommandBar);
            Ok(())
        })
    }

    pub(super) fn duplicate_workspace<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
        id: WorkspaceId,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            match env.api.duplicate_workspace(id).await {
                Ok(copy) => {
                    info!(source = %id, copy = %copy.id, "duplicated workspace");
                    env.cache.invalidate(&workspace_keys::all());
                }
                Err(err) => {
                    warn!(workspace = %id, "duplicate failed: {err}");
                    env.errors.report(err.message);
                }
            }
            Ok(())
        })
    }

    pub(super) fn pin_workspace<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
        id: WorkspaceId,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            let workspace = env.api.get_workspace(id).await?;
            let update = UpdateWorkspaceRequest {
                pinned: Some(!workspace.pinned),
                ..Default::default()
            };
            env.api.update_workspace(id, update).await?;
            env.cache.invalidate(&workspace_keys::by_id(id));
            env.cache.invalidate(&workspace_keys::all());
            Ok(())
        })
    }

    pub(super) fn archive_workspace<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
        id: WorkspaceId,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            let workspace = env.api.get_workspace(id).await?;
            let update = UpdateWorkspaceRequest {
                archived: Some(!workspace.archived),
                ..Default::default()
            };
            env.api.update_workspace(id, update).await?;
            env.cache.invalidate(&workspace_keys::by_id(id));
            env.cache.invalidate(&workspace_keys::all());
            Ok(())
        })
    }

    pub(super) fn delete_workspace<'a>(
        env: &'a ExecutionEnv,
        _ctx: &'a VisibilityContext,
        id: WorkspaceId,
    ) -> ExecResult<'a> {
        Box::pin(async move {
            let name = match env.api.get_workspace(id).await {
                Ok(workspace) => workspace.name,
                Err(err) => {
                    env.errors.report(err.message);
                    return Ok(());
                }
            };
            let request = ConfirmRequest::new(
                "Delete workspace",
                format!("Delete \"{name}\"? This cannot be undone."),
            )
            .with_confirm_label("Delete");
            if env.confirm.confirm(request).await == Confirmation::Cancelled {
                return Ok(());
            }
            match env.api.delete_workspace(id).await {
                Ok(()) => {
                    info!(workspace = %id, "deleted workspace");
                    env.cache.invalidate(&workspace_keys::all());
                }
                Err(err) => {
                    warn!(workspace = %id, "delete failed: {err}");
                    env.errors.report(err.message);
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::VisibilityContext;
    use crate::registry::ActionRegistry;
    use crate::state::{
        DiffState, DiffViewMode, LayoutState, WorkspaceSummary, WorkspacesState,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn make_workspace(pinned: bool, archived: bool) -> WorkspaceSummary {
        WorkspaceSummary {
            id: Uuid::new_v4(),
            name: "api".to_string(),
            branch: None,
            pinned,
            archived,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx_with(workspace: Option<WorkspaceSummary>, diffs: DiffState) -> VisibilityContext {
        let mut workspaces = WorkspacesState::new();
        if let Some(workspace) = workspace {
            workspaces.set_workspaces(vec![workspace]);
        }
        VisibilityContext::build(&LayoutState::new(), &workspaces, &diffs)
    }

    #[test]
    fn test_archive_visible_only_with_workspace() {
        let registry = ActionRegistry::builtin();
        let archive = registry.get(ActionId::ArchiveWorkspace);

        let without = ctx_with(None, DiffState::new());
        assert!(!archive.is_visible(&without));

        let with = ctx_with(Some(make_workspace(false, false)), DiffState::new());
        assert!(archive.is_visible(&with));
    }

    #[test]
    fn test_pin_label_follows_subject() {
        let registry = ActionRegistry::builtin();
        let pin = registry.get(ActionId::PinWorkspace);

        assert_eq!(pin.resolve_label(None), "Pin");
        assert_eq!(pin.resolve_label(Some(&make_workspace(false, false))), "Pin");
        assert_eq!(pin.resolve_label(Some(&make_workspace(true, false))), "Unpin");
    }

    #[test]
    fn test_archive_label_follows_subject() {
        let registry = ActionRegistry::builtin();
        let archive = registry.get(ActionId::ArchiveWorkspace);

        assert_eq!(archive.resolve_label(Some(&make_workspace(false, false))), "Archive");
        assert_eq!(
            archive.resolve_label(Some(&make_workspace(false, true))),
            "Unarchive"
        );
    }

    #[test]
    fn test_tooltip_defaults_to_label() {
        let registry = ActionRegistry::builtin();
        let ctx = ctx_with(None, DiffState::new());
        let create = registry.get(ActionId::CreateWorkspace);
        assert_eq!(create.resolve_tooltip(&ctx, None), "New Workspace");
    }

    #[test]
    fn test_diff_layout_icon_tracks_mode_and_vanishes_without_diffs() {
        let registry = ActionRegistry::builtin();
        let toggle = registry.get(ActionId::ToggleDiffLayout);

        let empty = ctx_with(None, DiffState::new());
        assert_eq!(toggle.resolve_icon(&empty), None);
        assert!(!toggle.is_enabled(&empty));

        let unified = ctx_with(
            None,
            DiffState {
                view_mode: DiffViewMode::Unified,
                expanded: 0,
                total: 3,
            },
        );
        assert_eq!(toggle.resolve_icon(&unified), Some(Icon::Columns));
        assert!(!toggle.is_active(&unified));

        let split = ctx_with(
            None,
            DiffState {
                view_mode: DiffViewMode::Split,
                expanded: 1,
                total: 3,
            },
        );
        assert_eq!(toggle.resolve_icon(&split), Some(Icon::Rows));
        assert!(toggle.is_active(&split));
    }

    #[test]
    fn test_diff_expansion_enablement() {
        let registry = ActionRegistry::builtin();
        let collapse = registry.get(ActionId::CollapseAllDiffs);
        let expand = registry.get(ActionId::ExpandAllDiffs);

        let collapsed = ctx_with(
            None,
            DiffState {
                view_mode: DiffViewMode::Unified,
                expanded: 0,
                total: 3,
            },
        );
        assert!(!collapse.is_enabled(&collapsed));
        assert!(expand.is_enabled(&collapsed));

        let expanded = ctx_with(
            None,
            DiffState {
                view_mode: DiffViewMode::Unified,
                expanded: 3,
                total: 3,
            },
        );
        assert!(collapse.is_enabled(&expanded));
        assert!(!expand.is_enabled(&expanded));
    }

    #[test]
    fn test_resolution_is_referentially_transparent() {
        let registry = ActionRegistry::builtin();
        let ctx = ctx_with(Some(make_workspace(true, false)), DiffState::new());
        for action in registry.iter() {
            assert_eq!(action.resolve_label(None), action.resolve_label(None));
            assert_eq!(action.resolve_icon(&ctx), action.resolve_icon(&ctx));
            assert_eq!(action.is_visible(&ctx), action.is_visible(&ctx));
            assert_eq!(action.is_active(&ctx), action.is_active(&ctx));
            assert_eq!(action.is_enabled(&ctx), action.is_enabled(&ctx));
        }
    }

    #[test]
    fn test_only_workspace_actions_require_a_target() {
        let registry = ActionRegistry::builtin();
        let target_requiring: Vec<ActionId> = registry
            .iter()
            .filter(|a| a.exec.requires_target())
            .map(|a| a.id)
            .collect();
        assert_eq!(
            target_requiring,
            vec![
                ActionId::DuplicateWorkspace,
                ActionId::PinWorkspace,
                ActionId::ArchiveWorkspace,
                ActionId::DeleteWorkspace,
            ]
        );
    }
}
