use super::{failure_line, truncate_str};
use crate::app::App;
use crate::renderer::{ListRenderer, LoadState};
use crate::view::{CatalogCard, views};
use crate::model::CatalogItem;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Catalog lists side by side, one column each.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let catalogs = &app.site.catalogs;
    if catalogs.is_empty() {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, catalogs.len() as u32); catalogs.len()])
        .split(area);

    for (catalog, column) in catalogs.iter().zip(columns.iter()) {
        let width = column.width.saturating_sub(2) as usize;
        let lines = column_lines(&catalog.list, app, width);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", catalog.config.label()));
        if let Some(line) = failure_line(&catalog.list) {
            block = block.title_bottom(line);
        }
        let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(widget, *column);
    }
}

fn column_lines<'a>(list: &ListRenderer<CatalogItem>, app: &App, width: usize) -> Vec<Line<'a>> {
    match list.state() {
        LoadState::Idle | LoadState::Loading if list.dataset().is_empty() => {
            return vec![Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        LoadState::Failed(msg) if list.dataset().is_empty() => {
            return vec![Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red)))];
        }
        _ => {}
    }

    let cards = views(list.view_set(), &app.site.locale);
    let mut lines = Vec::new();
    for card in &cards {
        lines.extend(card_lines(card, width));
        lines.push(Line::from(""));
    }
    lines
}

fn card_lines<'a>(card: &CatalogCard, width: usize) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        truncate_str(&card.title, width),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(image) = &card.image {
        lines.push(Line::from(Span::styled(
            truncate_str(&format!("🖼 {}", image), width),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(card.description.clone()));
    if !card.tags.is_empty() {
        let mut spans = Vec::new();
        for tag in &card.tags {
            spans.push(Span::styled(
                format!("[{}]", tag),
                Style::default().fg(Color::Magenta),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    let meta: Vec<&str> = [card.players.as_str(), card.time.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join("  "),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}
