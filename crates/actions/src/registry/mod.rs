mod catalog;
mod definition;
#[allow(clippy::module_inception)]
mod registry;

pub use catalog::{default_navbar, pages};
pub use definition::*;
pub use registry::ActionRegistry;
