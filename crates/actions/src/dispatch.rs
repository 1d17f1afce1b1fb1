//! The single execution entry point shared by every render surface.

use thiserror::Error;
use tracing::debug;

use crate::collab::ExecutionEnv;
use crate::context::VisibilityContext;
use crate::registry::{ActionError, ActionExec, ActionId, ActionRegistry};
use crate::state::WorkspaceId;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Caller contract violation: a target-requiring action was dispatched
    /// without a subject. Nothing was invoked.
    #[error("action `{0}` requires a target workspace")]
    MissingSubject(&'static str),
    #[error(transparent)]
    Action(#[from] ActionError),
}

pub struct Dispatcher {
    registry: ActionRegistry,
    env: ExecutionEnv,
}

impl Dispatcher {
    pub fn new(registry: ActionRegistry, env: ExecutionEnv) -> Self {
        Self { registry, env }
    }

    /// Run an action to completion. A workspace action with no subject is
    /// rejected before any side effect. Cache invalidations made by the
    /// action body are issued before this future resolves, so an awaited
    /// dispatch followed by a refetch observes post-invalidation state.
    pub async fn execute(
        &self,
        id: ActionId,
        ctx: &VisibilityContext,
        subject: Option<WorkspaceId>,
    ) -> Result<(), DispatchError> {
        let action = self.registry.get(id);
        debug!(action = id.as_str(), ?subject, "dispatching");
        match action.exec {
            ActionExec::Global(run) => run(&self.env, ctx).await?,
            ActionExec::Workspace(run) => {
                let Some(subject) = subject else {
                    return Err(DispatchError::MissingSubject(id.as_str()));
                };
                run(&self.env, ctx, subject).await?;
            }
        }
        Ok(())
    }
}
