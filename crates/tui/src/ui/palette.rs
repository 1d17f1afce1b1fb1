use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use actions::command_bar::{PaletteGroup, PaletteItem};
use actions::context::VisibilityContext;
use actions::pages::PageGraph;
use actions::registry::{ActionRegistry, ActionVariant};

use crate::state::AppState;

use super::modal::centered_rect;

/// The selectable rows in display order, flattened across groups. The app
/// uses the same order for its cursor.
pub fn flat_rows(groups: &[PaletteGroup]) -> Vec<PaletteItem> {
    groups
        .iter()
        .flat_map(|g| g.items.iter().copied())
        .collect()
}

pub fn render_palette(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    graph: &PageGraph,
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
) {
    let modal_area = centered_rect(55, 70, area);
    let clear = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(clear, modal_area);

    let subject = state.workspaces.selected();
    let groups = state
        .palette
        .visible_groups(graph, registry, ctx, subject);

    let title = graph
        .get(state.palette.current_page())
        .title
        .unwrap_or("Commands");

    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(state.palette.search().to_string()),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    let mut row = 0;
    for group in &groups {
        if !group.label.is_empty() {
            lines.push(Line::from(Span::styled(
                group.label,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        for item in &group.items {
            let highlighted = row == state.palette_cursor;
            lines.push(palette_row(*item, highlighted, registry, ctx, state, graph));
            row += 1;
        }
        lines.push(Line::from(""));
    }

    if row == 0 {
        lines.push(Line::from(Span::styled(
            "No matching commands",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let palette = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(palette, modal_area);
}

fn palette_row(
    item: PaletteItem,
    highlighted: bool,
    registry: &ActionRegistry,
    ctx: &VisibilityContext,
    state: &AppState,
    graph: &PageGraph,
) -> Line<'static> {
    let (text, mut style) = match item {
        PaletteItem::Back => ("  <- Back".to_string(), Style::default()),
        PaletteItem::Page(id) => {
            let title = graph.get(id).title.unwrap_or_default();
            (format!("  {title} ..."), Style::default())
        }
        PaletteItem::Action(id) => {
            let action = registry.get(id);
            let label = action.resolve_label(state.workspaces.selected());
            let icon = action
                .resolve_icon(ctx)
                .map(|i| format!("{} ", i.glyph()))
                .unwrap_or_default();
            let chord = action.shortcut.map(|c| format!("  [{c}]")).unwrap_or_default();
            let style = if !action.is_enabled(ctx) {
                Style::default().fg(Color::DarkGray)
            } else if action.variant == ActionVariant::Destructive {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            (format!("  {icon}{label}{chord}"), style)
        }
    };

    if highlighted {
        style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(text, style))
}
