use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::{Book, Shelf};
use crate::theme::Palette;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::prompt::popup_area;

/// Modal listing the three shelves for a staged book.
pub fn render_shelf_pick(
    f: &mut Frame,
    area: Rect,
    book: &Book,
    selection: usize,
    palette: &Palette,
) {
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.surface);
    let highlight_bg = parse_color(palette.primary);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup = popup_area(area, 50, 9);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(text_color),
        )),
        Line::from(""),
    ];

    for (index, shelf) in Shelf::ALL.iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(text_color)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, shelf.label()),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to add, Esc to cancel",
        Style::default().fg(secondary),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Add to shelf")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(bg_color)),
        )
        .style(Style::default().fg(text_color).bg(bg_color))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup);
}
