use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Palette;
use crate::tui::widgets::color::parse_color;

/// Small centered single-line input prompt.
pub fn render_input_prompt(f: &mut Frame, area: Rect, title: &str, value: &str, palette: &Palette) {
    let text_color = parse_color(palette.text);
    let bg_color = parse_color(palette.surface);
    let border_color = parse_color(palette.primary);

    let popup = popup_area(area, 40, 3);
    f.render_widget(Clear, popup);

    let lines = vec![Line::from(vec![
        Span::styled(format!("{}_", value), Style::default().fg(text_color)),
    ])];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(bg_color)),
        )
        .style(Style::default().fg(text_color).bg(bg_color));

    f.render_widget(paragraph, popup);
}

/// Centered rect with a fixed height and percentage width.
/// Based on the ratatui popup example.
pub fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
