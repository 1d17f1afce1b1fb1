use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type WorkspaceId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub id: WorkspaceId,
    pub name: String,
    pub branch: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffViewMode {
    Unified,
    Split,
}

impl DiffViewMode {
    pub fn toggled(self) -> Self {
        match self {
            DiffViewMode::Unified => DiffViewMode::Split,
            DiffViewMode::Split => DiffViewMode::Unified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub sidebar_open: bool,
}

impl LayoutState {
    pub fn new() -> Self {
        Self { sidebar_open: true }
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WorkspacesState {
    pub workspaces: Vec<WorkspaceSummary>,
    pub selected_id: Option<WorkspaceId>,
}

impl WorkspacesState {
    pub fn new() -> Self {
        Self {
            workspaces: Vec::new(),
            selected_id: None,
        }
    }

    /// Replace the workspace list, keeping the current selection when the
    /// workspace still exists.
    pub fn set_workspaces(&mut self, workspaces: Vec<WorkspaceSummary>) {
        self.workspaces = workspaces;
        if let Some(id) = self.selected_id
            && !self.workspaces.iter().any(|w| w.id == id)
        {
            self.selected_id = None;
        }
        if self.selected_id.is_none() {
            self.selected_id = self.workspaces.first().map(|w| w.id);
        }
    }

    pub fn selected(&self) -> Option<&WorkspaceSummary> {
        let id = self.selected_id?;
        self.workspaces.iter().find(|w| w.id == id)
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id?;
        self.workspaces.iter().position(|w| w.id == id)
    }

    pub fn select_next(&mut self) {
        if self.workspaces.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1) % self.workspaces.len(),
            None => 0,
        };
        self.selected_id = Some(self.workspaces[next].id);
    }

    pub fn select_prev(&mut self) {
        if self.workspaces.is_empty() {
            return;
        }
        let prev = match self.selected_index() {
            Some(0) | None => self.workspaces.len() - 1,
            Some(i) => i - 1,
        };
        self.selected_id = Some(self.workspaces[prev].id);
    }
}

impl Default for WorkspacesState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffState {
    pub view_mode: DiffViewMode,
    /// Number of diff cards currently expanded.
    pub expanded: usize,
    /// Total number of diff cards in the current view.
    pub total: usize,
}

impl DiffState {
    pub fn new() -> Self {
        Self {
            view_mode: DiffViewMode::Unified,
            expanded: 0,
            total: 0,
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded = 0;
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.total;
    }
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_workspace(name: &str) -> WorkspaceSummary {
        WorkspaceSummary {
            id: Uuid::new_v4(),
            name: name.to_string(),
            branch: None,
            pinned: false,
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_set_workspaces_selects_first() {
        let mut state = WorkspacesState::new();
        state.set_workspaces(vec![make_workspace("a"), make_workspace("b")]);
        assert_eq!(state.selected().unwrap().name, "a");
    }

    #[test]
    fn test_set_workspaces_keeps_selection_when_present() {
        let mut state = WorkspacesState::new();
        let a = make_workspace("a");
        let b = make_workspace("b");
        let b_id = b.id;
        state.set_workspaces(vec![a.clone(), b.clone()]);
        state.selected_id = Some(b_id);
        state.set_workspaces(vec![b, a]);
        assert_eq!(state.selected_id, Some(b_id));
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = WorkspacesState::new();
        state.set_workspaces(vec![make_workspace("a"), make_workspace("b")]);
        state.select_prev();
        assert_eq!(state.selected().unwrap().name, "b");
        state.select_next();
        assert_eq!(state.selected().unwrap().name, "a");
    }

    #[test]
    fn test_diff_view_mode_toggles() {
        assert_eq!(DiffViewMode::Unified.toggled(), DiffViewMode::Split);
        assert_eq!(DiffViewMode::Split.toggled(), DiffViewMode::Unified);
    }
}
