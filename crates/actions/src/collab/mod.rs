//! Collaborator boundary.
//!
//! Action bodies only ever talk to these traits. The host wires concrete
//! implementations into an [`ExecutionEnv`]; tests substitute spies.

mod http;

pub use http::{ApiResponse, HttpWorkspaceApi};

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::state::{DiffViewMode, WorkspaceId, WorkspaceSummary};

/// Collaborator failure with a human-readable message, surfaced to an
/// [`ErrorSink`] or logged, per action.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateWorkspaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, ApiError>;
    async fn get_workspace(&self, id: WorkspaceId) -> Result<WorkspaceSummary, ApiError>;
    async fn create_workspace(
        &self,
        create: CreateWorkspaceRequest,
    ) -> Result<WorkspaceSummary, ApiError>;
    async fn duplicate_workspace(&self, id: WorkspaceId) -> Result<WorkspaceSummary, ApiError>;
    async fn update_workspace(
        &self,
        id: WorkspaceId,
        update: UpdateWorkspaceRequest,
    ) -> Result<WorkspaceSummary, ApiError>;
    async fn delete_workspace(&self, id: WorkspaceId) -> Result<(), ApiError>;
}

/// Query-cache collaborator. Actions only depend on the key builders in
/// [`workspace_keys`], never on cache internals.
pub trait QueryCache: Send + Sync {
    fn invalidate(&self, key: &[String]);
}

pub mod workspace_keys {
    use crate::state::WorkspaceId;

    pub fn all() -> Vec<String> {
        vec!["workspaces".to_string()]
    }

    pub fn by_id(id: WorkspaceId) -> Vec<String> {
        vec!["workspaces".to_string(), id.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: &'static str,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm",
        }
    }

    pub fn with_confirm_label(mut self, label: &'static str) -> Self {
        self.confirm_label = label;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Blocking modal confirmation. Destructive actions await this before
/// mutating and no-op on [`Confirmation::Cancelled`].
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    async fn confirm(&self, request: ConfirmRequest) -> Confirmation;
}

/// Caller-supplied error setter; the host decides how reported messages are
/// displayed.
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: String);
}

/// Fire-and-forget UI mutation requested by an action body. The host owns
/// the layout/diff stores and applies intents on its next loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIntent {
    ToggleSidebar,
    SetDiffViewMode(DiffViewMode),
    CollapseAllDiffs,
    ExpandAllDiffs,
    OpenSettings,
    OpenCommandBar,
}

pub trait IntentSink: Send + Sync {
    fn send(&self, intent: UiIntent);
}

/// Everything an action body may touch while executing.
#[derive(Clone)]
pub struct ExecutionEnv {
    pub api: Arc<dyn WorkspaceApi>,
    pub cache: Arc<dyn QueryCache>,
    pub confirm: Arc<dyn ConfirmDialog>,
    pub errors: Arc<dyn ErrorSink>,
    pub intents: Arc<dyn IntentSink>,
}
