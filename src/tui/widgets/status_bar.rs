use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::theme::Palette;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[&str],
    palette: &Palette,
) {
    let fg_color = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.background);
    let highlight_bg = parse_color(palette.primary);

    let (mut content, style) = if let Some(msg) = message {
        // Status messages get a highlighted background for visibility
        let msg_fg = get_contrast_text_color(highlight_bg);
        (
            msg.clone(),
            Style::default()
                .fg(msg_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            key_hints.join(" | "),
            Style::default().fg(fg_color).bg(bg_color),
        )
    };

    let max_width = area.width as usize;
    if content.chars().count() > max_width {
        content = content
            .chars()
            .take(max_width.saturating_sub(3))
            .collect::<String>()
            + "...";
    }

    let paragraph = Paragraph::new(content).style(style);
    f.render_widget(paragraph, area);
}
