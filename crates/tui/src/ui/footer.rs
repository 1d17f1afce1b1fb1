use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{AppState, UiMode};

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(status) = &state.status {
        let footer = Paragraph::new(Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("  (r: refresh)", Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, area);
        return;
    }

    let hints = match state.mode {
        UiMode::Board => {
            "j/k: navigate | Enter/m: menu | Ctrl+K: commands | c: new | r: refresh | q: quit"
        }
        UiMode::Palette => "type to search | Enter: run | Esc: close",
        UiMode::ContextMenu => "j/k: navigate | Enter: run | Esc: close",
        UiMode::Confirm => "y: confirm | n: cancel",
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if !state.backend_connected {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Disconnected", Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
