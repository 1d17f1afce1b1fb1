use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use actions::context::VisibilityContext;
use actions::navbar::{self, NavbarItem};
use actions::registry::{ActionRegistry, ActionVariant, default_navbar};

use crate::state::AppState;

/// The icon strip across the top: the default navbar layout, compacted for
/// the current context, with active/enabled state mapped to styling.
pub fn render_navbar(
    frame: &mut Frame,
    area: Rect,
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
    state: &AppState,
) {
    let items = navbar::compact(default_navbar(), registry, ctx);
    let subject = state.workspaces.selected();

    let mut spans = vec![Span::styled(
        " deck ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for item in items {
        match item {
            NavbarItem::Divider => {
                spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            }
            NavbarItem::Action(id) => {
                let action = registry.get(id);
                let label = action.resolve_label(subject);
                let cell = match action.resolve_icon(ctx) {
                    Some(icon) => format!(" {} {} ", icon.glyph(), label),
                    None => format!(" {} ", label),
                };
                let style = if !action.is_enabled(ctx) {
                    Style::default().fg(Color::DarkGray)
                } else if action.is_active(ctx) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else if action.variant == ActionVariant::Destructive {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(cell, style));
            }
        }
    }

    let navbar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(navbar, area);
}
