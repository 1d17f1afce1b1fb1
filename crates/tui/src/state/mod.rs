use std::collections::HashSet;
use std::sync::Mutex;

use actions::collab::{ConfirmRequest, Confirmation, QueryCache};
use actions::command_bar::CommandBar;
use actions::state::{DiffState, LayoutState, WorkspacesState};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Board,
    Palette,
    ContextMenu,
    Confirm,
}

/// A confirmation requested by a running action, waiting for the user's
/// answer from the modal.
pub struct PendingConfirm {
    pub request: ConfirmRequest,
    pub reply: oneshot::Sender<Confirmation>,
}

pub struct AppState {
    pub layout: LayoutState,
    pub workspaces: WorkspacesState,
    pub diffs: DiffState,

    pub mode: UiMode,
    pub palette: CommandBar,
    pub palette_cursor: usize,
    pub menu_cursor: usize,
    pub pending_confirm: Option<PendingConfirm>,

    pub status: Option<String>,
    pub backend_connected: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            layout: LayoutState::new(),
            workspaces: WorkspacesState::new(),
            diffs: DiffState::new(),

            mode: UiMode::Board,
            palette: CommandBar::new(),
            palette_cursor: 0,
            menu_cursor: 0,
            pending_confirm: None,

            status: None,
            backend_connected: false,
            should_quit: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Query-cache implementation that records stale key roots. Actions
/// invalidate through the framework's key builders; the app takes the root
/// on its next loop tick and refetches.
#[derive(Default)]
pub struct StaleSet {
    roots: Mutex<HashSet<String>>,
}

impl StaleSet {
    pub fn mark(&self, root: &str) {
        self.roots.lock().unwrap().insert(root.to_string());
    }

    /// Clears and returns whether the root was stale.
    pub fn take(&self, root: &str) -> bool {
        self.roots.lock().unwrap().remove(root)
    }
}

impl QueryCache for StaleSet {
    fn invalidate(&self, key: &[String]) {
        if let Some(root) = key.first() {
            self.roots.lock().unwrap().insert(root.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actions::collab::workspace_keys;

    #[test]
    fn test_stale_set_keeps_key_roots() {
        let cache = StaleSet::default();
        cache.invalidate(&workspace_keys::all());
        assert!(cache.take("workspaces"));
        assert!(!cache.take("workspaces"));
    }

    #[test]
    fn test_by_id_invalidation_marks_the_root() {
        let cache = StaleSet::default();
        cache.invalidate(&["workspaces".to_string(), "some-id".to_string()]);
        assert!(cache.take("workspaces"));
    }
}
