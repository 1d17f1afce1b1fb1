mod footer;
mod menu;
mod modal;
mod navbar;
mod palette;
mod workspaces;

pub use footer::render_footer;
pub use menu::{context_menu_actions, render_context_menu};
pub use modal::render_confirm;
pub use navbar::render_navbar;
pub use palette::{flat_rows, render_palette};
pub use workspaces::{render_workspace_detail, render_workspace_list};
