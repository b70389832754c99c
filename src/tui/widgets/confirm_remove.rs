use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::Book;
use crate::theme::Palette;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::prompt::popup_area;

const OPTIONS: [&str; 2] = ["Remove", "Cancel"];

pub fn render_confirm_remove(
    f: &mut Frame,
    area: Rect,
    book: &Book,
    selection: usize,
    palette: &Palette,
) {
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.surface);
    let highlight_bg = parse_color(palette.error);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup = popup_area(area, 50, 8);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Remove this book from the shelf?",
            Style::default().fg(text_color),
        )),
        Line::from(""),
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(text_color),
        )),
        Line::from(""),
    ];

    for (index, option) in OPTIONS.iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(secondary)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, option),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(bg_color)),
        )
        .style(Style::default().fg(text_color).bg(bg_color))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup);
}
