use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::KeyBindings;
use crate::theme::Palette;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::prompt::popup_area;

pub fn render_help(f: &mut Frame, area: Rect, bindings: &KeyBindings, palette: &Palette) {
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.surface);

    let popup = popup_area(area, 60, 18);
    f.render_widget(Clear, popup);

    let entries: [(&str, &str); 14] = [
        ("Tabs", ""),
        (bindings.tab_left.as_str(), "previous tab"),
        (bindings.tab_right.as_str(), "next tab"),
        ("1-5", "jump to a tab"),
        ("Actions", ""),
        (bindings.add.as_str(), "add selected book to a shelf"),
        (bindings.delete.as_str(), "remove selected book"),
        (bindings.progress.as_str(), "update reading progress"),
        ("n", "add a note to the selected book"),
        (bindings.search.as_str(), "search the catalog"),
        (bindings.shelf_cycle.as_str(), "cycle shelves"),
        (bindings.toggle_theme.as_str(), "toggle light/dark"),
        ("e", "export library to clipboard"),
        (bindings.quit.as_str(), "quit"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            if action.is_empty() {
                Line::from(Span::styled(key.to_string(), Style::default().fg(text_color)))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {:<6}", key), Style::default().fg(text_color)),
                    Span::styled(action.to_string(), Style::default().fg(secondary)),
                ])
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(bg_color)),
        )
        .style(Style::default().fg(text_color).bg(bg_color));

    f.render_widget(paragraph, popup);
}
