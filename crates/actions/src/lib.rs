//! Declarative action framework for the deck workspace manager.
//!
//! One static catalog of user-invocable operations feeds every command
//! surface: the navbar strip, the hierarchical command bar, and per-workspace
//! context menus. Surfaces never hardcode enablement, labeling, or dispatch;
//! they derive everything from the catalog through a per-render
//! [`context::VisibilityContext`] and hand execution to the
//! [`dispatch::Dispatcher`].

pub mod collab;
pub mod command_bar;
pub mod context;
pub mod dispatch;
pub mod navbar;
pub mod pages;
pub mod registry;
pub mod shortcuts;
pub mod state;

use crate::pages::{ConfigError, PageGraph};
use crate::registry::ActionRegistry;

/// Startup self-check over all static configuration. Hosts call this once
/// before rendering anything; a failure is a configuration bug, not a
/// runtime condition.
pub fn self_check() -> Result<(), ConfigError> {
    ActionRegistry::builtin().self_check()?;
    PageGraph::builtin().self_check()?;
    Ok(())
}
