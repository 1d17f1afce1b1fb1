use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use actions::state::DiffViewMode;

use crate::state::AppState;

pub fn render_workspace_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::with_capacity(state.workspaces.workspaces.len());

    for workspace in &state.workspaces.workspaces {
        let selected = state.workspaces.selected_id == Some(workspace.id);
        let marker = if selected { "> " } else { "  " };

        let mut spans = vec![Span::raw(marker)];
        let name_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if workspace.archived {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        spans.push(Span::styled(workspace.name.clone(), name_style));

        if workspace.pinned {
            spans.push(Span::styled(" ^", Style::default().fg(Color::Yellow)));
        }
        if workspace.archived {
            spans.push(Span::styled(
                " [archived]",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No workspaces. Press c to create one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Workspaces ({}) ", state.workspaces.workspaces.len())),
    );
    frame.render_widget(list, area);
}

pub fn render_workspace_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();

    match state.workspaces.selected() {
        Some(workspace) => {
            lines.push(Line::from(vec![
                Span::styled(
                    workspace.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                if workspace.pinned {
                    Span::styled("  pinned", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("")
                },
            ]));
            if let Some(branch) = &workspace.branch {
                lines.push(Line::from(format!("branch: {branch}")));
            }
            lines.push(Line::from(format!(
                "updated: {}",
                workspace.updated_at.format("%Y-%m-%d %H:%M")
            )));
            lines.push(Line::from(""));

            let layout = match state.diffs.view_mode {
                DiffViewMode::Unified => "unified",
                DiffViewMode::Split => "split",
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "Diffs: {} ({} expanded, {} layout)",
                    state.diffs.total, state.diffs.expanded, layout
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Select a workspace",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let detail =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Workspace "));
    frame.render_widget(detail, area);
}
