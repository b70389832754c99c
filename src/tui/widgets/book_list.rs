use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::models::Book;
use crate::theme::Palette;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Render a scrollable book list inside a titled block. Books on the Reading
/// shelf carry page counts, so a progress suffix is shown when available.
pub fn render_book_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    books: &[Book],
    list_state: &mut ListState,
    palette: &Palette,
) {
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.background);
    let border_color = parse_color(palette.border);
    let highlight_bg = parse_color(palette.primary);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let items: Vec<ListItem> = books
        .iter()
        .map(|book| {
            let mut spans = vec![
                Span::styled(book.title.clone(), Style::default().fg(text_color)),
                Span::styled(format!(" - {}", book.author), Style::default().fg(secondary)),
            ];
            if let Some(rating) = book.rating {
                spans.push(Span::styled(
                    format!("  {:.1}*", rating),
                    Style::default().fg(secondary),
                ));
            }
            if let (Some(current), Some(pages)) = (book.current_page, book.pages) {
                spans.push(Span::styled(
                    format!("  {}/{} ({}%)", current, pages, book.progress_percent()),
                    Style::default().fg(secondary),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ({})", title, books.len()))
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(bg_color));

    if books.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
            "Nothing here yet",
            Style::default().fg(secondary),
        )))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(highlight_fg)
            .bg(highlight_bg)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(list, area, list_state);
}
