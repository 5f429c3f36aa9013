mod catalog;
mod help;
mod windowed;

use crate::app::App;
use crate::renderer::{ListRenderer, LoadState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + catalogs(min) + masters(9) + gallery(7) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = match app.loaded_at {
        Some(at) => format!(" Tabletop Showcase   [loaded {}]", at.format("%H:%M")),
        None => " Tabletop Showcase".to_string(),
    };
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    catalog::render(app, frame, chunks[1]);
    windowed::render_masters(app, frame, chunks[2]);
    windowed::render_gallery(app, frame, chunks[3]);

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←→"),
        Span::raw(" Page  "),
        key("Tab"),
        Span::raw(" Focus  "),
        key("r"),
        Span::raw(" Reload  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Red marker for a list whose latest load failed while older items are still shown.
/// Empty lists show the error in place of their content instead.
fn failure_line<'a, T: Clone>(list: &ListRenderer<T>) -> Option<Line<'a>> {
    match list.state() {
        LoadState::Failed(msg) if !list.dataset().is_empty() => Some(Line::from(Span::styled(
            format!(" ⚠ {} ", msg),
            Style::default().fg(Color::Red),
        ))),
        _ => None,
    }
}

/// Truncate a string to `max_width` terminal columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
