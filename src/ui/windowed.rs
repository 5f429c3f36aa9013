use super::{failure_line, truncate_str};
use crate::app::App;
use crate::pager::Controls;
use crate::renderer::{ListRenderer, LoadState};
use crate::site::WindowId;
use crate::view::views;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_masters(app: &App, frame: &mut Frame, area: Rect) {
    let list = &app.site.masters;
    let block = panel_block(" Masters ", list, app.focus == WindowId::Masters);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(placeholder) = placeholder(list) {
        frame.render_widget(placeholder, inner);
        return;
    }

    let cards = views(list.view_set(), &app.site.locale);
    let slots = list.cursor().visible();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, slots as u32); slots])
        .split(inner);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let width = column.width.saturating_sub(1) as usize;
        let mut lines = vec![
            Line::from(Span::styled(
                truncate_str(&card.name, width),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_str(&card.systems, width),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                truncate_str(&format!("🖼 {}", card.image), width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if !card.description.is_empty() {
            lines.push(Line::from(card.description.clone()));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), *column);
    }
}

pub fn render_gallery(app: &App, frame: &mut Frame, area: Rect) {
    let list = &app.site.gallery;
    let block = panel_block(" Gallery ", list, app.focus == WindowId::Gallery);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(placeholder) = placeholder(list) {
        frame.render_widget(placeholder, inner);
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = views(list.view_set(), &app.site.locale)
        .into_iter()
        .map(|image| {
            Line::from(vec![
                Span::styled("🖼 ", Style::default().fg(Color::DarkGray)),
                Span::raw(truncate_str(&format!("{}  {}", image.alt, image.image), width)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn placeholder<'a, T: Clone>(list: &ListRenderer<T>) -> Option<Paragraph<'a>> {
    if !list.dataset().is_empty() {
        return None;
    }
    let (text, color) = match list.state() {
        LoadState::Failed(msg) => (msg.clone(), Color::Red),
        LoadState::Ready => ("Nothing here yet".to_string(), Color::DarkGray),
        LoadState::Idle | LoadState::Loading => ("Loading...".to_string(), Color::DarkGray),
    };
    Some(Paragraph::new(Span::styled(text, Style::default().fg(color))))
}

fn panel_block<'a, T: Clone>(title: &'a str, list: &ListRenderer<T>, focused: bool) -> Block<'a> {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let cursor = list.cursor();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    if let Some(line) = arrows_line(list.controls(), cursor.index(), cursor.visible(), cursor.len()) {
        block = block.title_bottom(line.alignment(Alignment::Right));
    }
    if let Some(line) = failure_line(list) {
        block = block.title_bottom(line.alignment(Alignment::Left));
    }
    block
}

/// `‹ 2-4 of 7 ›` with dimmed arrows where the move is not possible.
/// Nothing when the list fits in its window.
fn arrows_line<'a>(controls: Controls, index: usize, visible: usize, len: usize) -> Option<Line<'a>> {
    let Controls::Shown {
        prev_enabled,
        next_enabled,
    } = controls
    else {
        return None;
    };
    let arrow = |glyph: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(glyph, style)
    };
    let last = (index + visible).min(len);
    Some(Line::from(vec![
        arrow(" ‹ ", prev_enabled),
        Span::raw(format!("{}-{} of {}", index + 1, last, len)),
        arrow(" › ", next_enabled),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_arrows_hidden_when_everything_fits() {
        assert!(arrows_line(Controls::Hidden, 0, 5, 4).is_none());
    }

    #[test]
    fn test_arrows_show_window_position() {
        let line = arrows_line(
            Controls::Shown {
                prev_enabled: true,
                next_enabled: true,
            },
            1,
            3,
            7,
        )
        .unwrap();
        assert_eq!(text(&line), " ‹ 2-4 of 7 › ");
    }

    #[test]
    fn test_disabled_arrow_is_dimmed() {
        let line = arrows_line(
            Controls::Shown {
                prev_enabled: false,
                next_enabled: true,
            },
            0,
            3,
            7,
        )
        .unwrap();
        assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(line.spans[2].style.fg, Some(Color::Cyan));
    }
}
