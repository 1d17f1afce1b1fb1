use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::collab::{ApiError, ExecutionEnv};
use crate::context::VisibilityContext;
use crate::state::{WorkspaceId, WorkspaceSummary};

/// Stable identifier for a registered action.
///
/// The sum type makes id collisions unrepresentable; [`ActionId::as_str`]
/// yields the stable string id used for palette search keys and the
/// shortcut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    // Global
    CreateWorkspace,
    OpenSettings,
    ToggleSidebar,
    ToggleDiffLayout,
    CollapseAllDiffs,
    ExpandAllDiffs,
    OpenCommandBar,
    // Workspace-scoped
    DuplicateWorkspace,
    PinWorkspace,
    ArchiveWorkspace,
    DeleteWorkspace,
}

impl ActionId {
    pub const ALL: [ActionId; 11] = [
        ActionId::CreateWorkspace,
        ActionId::OpenSettings,
        ActionId::ToggleSidebar,
        ActionId::ToggleDiffLayout,
        ActionId::CollapseAllDiffs,
        ActionId::ExpandAllDiffs,
        ActionId::OpenCommandBar,
        ActionId::DuplicateWorkspace,
        ActionId::PinWorkspace,
        ActionId::ArchiveWorkspace,
        ActionId::DeleteWorkspace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::CreateWorkspace => "create-workspace",
            ActionId::OpenSettings => "open-settings",
            ActionId::ToggleSidebar => "toggle-sidebar",
            ActionId::ToggleDiffLayout => "toggle-diff-layout",
            ActionId::CollapseAllDiffs => "collapse-all-diffs",
            ActionId::ExpandAllDiffs => "expand-all-diffs",
            ActionId::OpenCommandBar => "open-command-bar",
            ActionId::DuplicateWorkspace => "duplicate-workspace",
            ActionId::PinWorkspace => "pin-workspace",
            ActionId::ArchiveWorkspace => "archive-workspace",
            ActionId::DeleteWorkspace => "delete-workspace",
        }
    }
}

/// Standard icon set shared by all surfaces. Each surface decides how to
/// draw an icon; the terminal client uses [`Icon::glyph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Plus,
    Gear,
    Sidebar,
    Columns,
    Rows,
    Command,
    Copy,
    Pin,
    Archive,
    Trash,
    Collapse,
    Expand,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Plus => "+",
            Icon::Gear => "*",
            Icon::Sidebar => "|=",
            Icon::Columns => "||",
            Icon::Rows => "==",
            Icon::Command => ">_",
            Icon::Copy => "cp",
            Icon::Pin => "^",
            Icon::Archive => "[]",
            Icon::Trash => "x",
            Icon::Collapse => "-",
            Icon::Expand => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Default,
    Destructive,
}

/// Static label, or a pure function of the optional subject workspace.
#[derive(Clone, Copy)]
pub enum ActionLabel {
    Static(&'static str),
    FromSubject(fn(Option<&WorkspaceSummary>) -> String),
}

/// Static icon, or a pure function of the context. A resolver returning
/// `None` means "no icon for this surface".
#[derive(Clone, Copy)]
pub enum ActionIcon {
    Static(Icon),
    Resolve(fn(&VisibilityContext) -> Option<Icon>),
}

pub type Predicate = fn(&VisibilityContext) -> bool;
pub type TooltipFn = fn(&VisibilityContext) -> String;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type GlobalHandler =
    for<'a> fn(&'a ExecutionEnv, &'a VisibilityContext) -> BoxFuture<'a, Result<(), ActionError>>;

pub type WorkspaceHandler = for<'a> fn(
    &'a ExecutionEnv,
    &'a VisibilityContext,
    WorkspaceId,
) -> BoxFuture<'a, Result<(), ActionError>>;

/// Execution body, tagged by target requirement. The dispatcher matches
/// exhaustively on this; a workspace handler is only ever invoked with a
/// subject id.
#[derive(Clone, Copy)]
pub enum ActionExec {
    Global(GlobalHandler),
    Workspace(WorkspaceHandler),
}

impl ActionExec {
    pub fn requires_target(&self) -> bool {
        matches!(self, ActionExec::Workspace(_))
    }
}

/// One registered action. Definitions are static configuration constructed
/// once at process start; all presentation is derived through the resolution
/// methods, never stored.
pub struct ActionDefinition {
    pub id: ActionId,
    pub label: ActionLabel,
    pub icon: ActionIcon,
    pub shortcut: Option<&'static str>,
    pub variant: ActionVariant,
    pub visible: Option<Predicate>,
    pub active: Option<Predicate>,
    pub enabled: Option<Predicate>,
    pub tooltip: Option<TooltipFn>,
    pub exec: ActionExec,
}

impl ActionDefinition {
    pub fn resolve_label(&self, subject: Option<&WorkspaceSummary>) -> String {
        match self.label {
            ActionLabel::Static(label) => label.to_string(),
            ActionLabel::FromSubject(resolve) => resolve(subject),
        }
    }

    pub fn resolve_icon(&self, ctx: &VisibilityContext) -> Option<Icon> {
        match self.icon {
            ActionIcon::Static(icon) => Some(icon),
            ActionIcon::Resolve(resolve) => resolve(ctx),
        }
    }

    /// Defaults to the resolved label when no tooltip resolver is declared.
    pub fn resolve_tooltip(
        &self,
        ctx: &VisibilityContext,
        subject: Option<&WorkspaceSummary>,
    ) -> String {
        match self.tooltip {
            Some(resolve) => resolve(ctx),
            None => self.resolve_label(subject),
        }
    }

    pub fn is_visible(&self, ctx: &VisibilityContext) -> bool {
        self.visible.map_or(true, |p| p(ctx))
    }

    pub fn is_active(&self, ctx: &VisibilityContext) -> bool {
        self.active.is_some_and(|p| p(ctx))
    }

    pub fn is_enabled(&self, ctx: &VisibilityContext) -> bool {
        self.enabled.map_or(true, |p| p(ctx))
    }
}
