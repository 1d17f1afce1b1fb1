use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use actions::context::VisibilityContext;
use actions::pages::{PageGraph, PageId, ResolvedItem};
use actions::registry::{ActionId, ActionRegistry, ActionVariant};

use crate::state::AppState;

/// The rows of the per-workspace context menu: the workspace-actions page
/// resolved and filtered for visibility. The app shares this order for its
/// cursor.
pub fn context_menu_actions(
    graph: &PageGraph,
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
) -> Vec<ActionId> {
    graph
        .resolve(PageId::WorkspaceActions)
        .groups
        .iter()
        .flat_map(|g| g.items.clone())
        .filter_map(|item| match item {
            ResolvedItem::Action(id) => Some(id),
            ResolvedItem::Page(_) => None,
        })
        .filter(|id| registry.get(*id).is_visible(ctx))
        .collect()
}

pub fn render_context_menu(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    graph: &PageGraph,
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
) {
    let subject = state.workspaces.selected();
    let rows = context_menu_actions(graph, registry, ctx);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let mut tooltip = None;

    for (i, id) in rows.iter().enumerate() {
        let action = registry.get(*id);
        let label = action.resolve_label(subject);
        let icon = action
            .resolve_icon(ctx)
            .map(|icon| format!("{} ", icon.glyph()))
            .unwrap_or_default();

        let highlighted = i == state.menu_cursor;
        if highlighted {
            tooltip = Some(action.resolve_tooltip(ctx, subject));
        }

        let mut style = if !action.is_enabled(ctx) {
            Style::default().fg(Color::DarkGray)
        } else if action.variant == ActionVariant::Destructive {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        if highlighted {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(format!(" {icon}{label} "), style)));
    }

    if let Some(tooltip) = tooltip {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {tooltip} "),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = subject.map(|w| w.name.as_str()).unwrap_or("Workspace");

    let menu_width = 36;
    let menu_height = lines.len() as u16 + 2;
    let x = (area.width.saturating_sub(menu_width)) / 2;
    let y = (area.height.saturating_sub(menu_height)) / 2;
    let menu_area = Rect::new(x, y, menu_width.min(area.width), menu_height.min(area.height));

    let clear = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(clear, menu_area);

    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(menu, menu_area);
}
