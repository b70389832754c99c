use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::models::Shelf;
use crate::stats;
use crate::tui::app::{GoalField, Mode};
use crate::tui::widgets::{
    book_list::render_book_list,
    color::{get_contrast_text_color, parse_color},
    confirm_remove::render_confirm_remove,
    help::render_help,
    prompt::render_input_prompt,
    shelf_pick::render_shelf_pick,
    status_bar::render_status_bar,
    tabs::render_tabs,
};
use crate::tui::{App, Layout, Tab};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = app.palette;
    let bg_color = parse_color(palette.background);
    let border_color = parse_color(palette.border);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Shelfmark")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(border_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.current_tab, palette);

    match app.current_tab {
        Tab::Home => render_home(f, layout.main_area, app),
        Tab::Search => render_search(f, layout.main_area, app),
        Tab::Shelves => render_shelves(f, layout.main_area, app),
        Tab::Goals => render_goals(f, layout.main_area, app),
        Tab::Stats => render_stats(f, layout.main_area, app),
    }

    let hints = key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_ref(),
        &hints,
        palette,
    );

    // Modal overlays render last so they sit on top of the tab content.
    match app.mode.clone() {
        Mode::ShelfPick => {
            if let Some(book) = app.pending_book.clone() {
                render_shelf_pick(f, layout.inner_area, &book, app.shelf_pick_index, palette);
            }
        }
        Mode::ProgressInput => {
            render_input_prompt(f, layout.inner_area, "Current page", &app.input_buffer, palette);
        }
        Mode::GoalInput(field) => {
            let title = match field {
                GoalField::Yearly => "Yearly goal",
                GoalField::Monthly => "Monthly goal",
            };
            render_input_prompt(f, layout.inner_area, title, &app.input_buffer, palette);
        }
        Mode::NoteInput => {
            render_input_prompt(f, layout.inner_area, "Add note", &app.input_buffer, palette);
        }
        Mode::ConfirmRemove => {
            if let Some(book) = app.selected_book().cloned() {
                render_confirm_remove(f, layout.inner_area, &book, app.confirm_index, palette);
            }
        }
        Mode::Help => render_help(f, layout.inner_area, &app.config.key_bindings, palette),
        Mode::View | Mode::SearchInput => {}
    }
}

fn key_hints(app: &App) -> Vec<&'static str> {
    match app.mode {
        Mode::SearchInput => vec!["Enter: search", "Esc: done"],
        Mode::ShelfPick | Mode::ConfirmRemove => vec!["Enter: confirm", "Esc: cancel"],
        Mode::ProgressInput | Mode::GoalInput(_) | Mode::NoteInput => {
            vec!["Enter: save", "Esc: cancel"]
        }
        Mode::Help => vec!["Esc: close"],
        Mode::View => match app.current_tab {
            Tab::Home | Tab::Search => vec!["a: add", "/: search", "F1: help", "q: quit"],
            Tab::Shelves => {
                vec!["Tab: shelf", "p: progress", "n: note", "d: remove", "F1: help", "q: quit"]
            }
            Tab::Goals => vec!["y: yearly", "m: monthly", "F1: help", "q: quit"],
            Tab::Stats => vec!["e: export", "t: theme", "F1: help", "q: quit"],
        },
    }
}

fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.palette;
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let border_color = parse_color(palette.border);
    let bg_color = parse_color(palette.background);

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let counts = stats::shelf_counts(&app.shelves);
    let reading_line = match app.shelves.reading.first() {
        Some(book) => Line::from(vec![
            Span::styled("Currently reading ", Style::default().fg(secondary)),
            Span::styled(book.title.clone(), Style::default().fg(text_color)),
            Span::styled(
                match (book.current_page, book.pages) {
                    (Some(current), Some(pages)) => {
                        format!("  {}/{} ({}%)", current, pages, book.progress_percent())
                    }
                    _ => String::new(),
                },
                Style::default().fg(secondary),
            ),
        ]),
        None => Line::from(Span::styled(
            "Nothing on your Reading shelf",
            Style::default().fg(secondary),
        )),
    };
    let lines = vec![
        reading_line,
        Line::from(vec![
            Span::styled("Reading ", Style::default().fg(secondary)),
            Span::styled(counts.reading.to_string(), Style::default().fg(text_color)),
            Span::styled("   Read ", Style::default().fg(secondary)),
            Span::styled(counts.read.to_string(), Style::default().fg(text_color)),
            Span::styled("   Want to Read ", Style::default().fg(secondary)),
            Span::styled(counts.want_to_read.to_string(), Style::default().fg(text_color)),
        ]),
        Line::from(vec![
            Span::styled("This year ", Style::default().fg(secondary)),
            Span::styled(
                app.stats.books_this_year.to_string(),
                Style::default().fg(text_color),
            ),
            Span::styled("   Streak ", Style::default().fg(secondary)),
            Span::styled(
                format!("{} days", app.stats.reading_streak),
                Style::default().fg(text_color),
            ),
        ]),
    ];
    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your library")
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(bg_color)),
    );
    f.render_widget(summary, chunks[0]);

    let books = app.recommendations.clone();
    render_book_list(
        f,
        chunks[1],
        "Recommended for you",
        &books,
        &mut app.list_state,
        palette,
    );
}

fn render_search(f: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.palette;
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let border_color = parse_color(palette.border);
    let bg_color = parse_color(palette.background);

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let (query_text, query_style) = if app.mode == Mode::SearchInput {
        (
            format!("{}_", app.search_query),
            Style::default().fg(text_color),
        )
    } else if app.search_query.is_empty() {
        (
            "Search books, authors...".to_string(),
            Style::default().fg(secondary),
        )
    } else {
        (app.search_query.clone(), Style::default().fg(text_color))
    };

    let search_border = if app.mode == Mode::SearchInput {
        parse_color(palette.primary)
    } else {
        border_color
    };
    let search_box = Paragraph::new(query_text).style(query_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Discover Books")
            .border_style(Style::default().fg(search_border))
            .style(Style::default().bg(bg_color)),
    );
    f.render_widget(search_box, chunks[0]);

    let title = if app.search_query.is_empty() {
        "All Books"
    } else {
        "Search Results"
    };
    let books = app.search_results.clone();
    render_book_list(f, chunks[1], title, &books, &mut app.list_state, palette);
}

fn render_shelves(f: &mut Frame, area: Rect, app: &mut App) {
    let palette = app.palette;
    let secondary = parse_color(palette.text_secondary);
    let bg_color = parse_color(palette.background);
    let highlight_bg = parse_color(palette.primary);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let mut spans = Vec::new();
    for shelf in Shelf::ALL {
        let count = app.shelves.books(shelf).len();
        let label = format!(" {} ({}) ", shelf.label(), count);
        let style = if shelf == app.shelf_tab {
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(secondary).bg(bg_color)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::default().bg(bg_color)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let books = app.shelves.books(app.shelf_tab).clone();
    render_book_list(
        f,
        chunks[1],
        app.shelf_tab.label(),
        &books,
        &mut app.list_state,
        palette,
    );
}

fn render_goals(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette;
    let secondary = parse_color(palette.text_secondary);
    let border_color = parse_color(palette.border);
    let bg_color = parse_color(palette.background);
    let gauge_color = parse_color(palette.primary);
    let success_color = parse_color(palette.success);

    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let (yearly_pct, monthly_pct) = stats::goal_progress(&app.stats, &app.goals);

    let yearly = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "Yearly: {} of {} books",
                    app.stats.books_this_year, app.goals.yearly
                ))
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(bg_color)),
        )
        .gauge_style(Style::default().fg(if yearly_pct >= 100 {
            success_color
        } else {
            gauge_color
        }))
        .percent(yearly_pct);
    f.render_widget(yearly, chunks[0]);

    let monthly = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "Monthly: {} of {} books",
                    app.stats.books_this_month, app.goals.monthly
                ))
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(bg_color)),
        )
        .gauge_style(Style::default().fg(if monthly_pct >= 100 {
            success_color
        } else {
            gauge_color
        }))
        .percent(monthly_pct);
    f.render_widget(monthly, chunks[1]);

    let hint = Paragraph::new("Press y or m to change a goal")
        .style(Style::default().fg(secondary).bg(bg_color));
    f.render_widget(hint, chunks[2]);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette;
    let text_color = parse_color(palette.text);
    let secondary = parse_color(palette.text_secondary);
    let border_color = parse_color(palette.border);
    let bg_color = parse_color(palette.background);

    let stat_line = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Style::default().fg(secondary)),
            Span::styled(value, Style::default().fg(text_color)),
        ])
    };

    let avg_pages = if app.stats.total_books == 0 {
        0
    } else {
        app.stats.total_pages / app.stats.total_books as i64
    };
    let lines = vec![
        stat_line("Books read", app.stats.total_books.to_string()),
        stat_line("Pages read", app.stats.total_pages.to_string()),
        stat_line("Avg pages/book", avg_pages.to_string()),
        stat_line("Average rating", format!("{:.1}", app.stats.average_rating)),
        stat_line("This year", app.stats.books_this_year.to_string()),
        stat_line("This month", app.stats.books_this_month.to_string()),
        stat_line(
            "Reading streak",
            format!("{} days", app.stats.reading_streak),
        ),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Reading Statistics")
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(bg_color)),
    );
    f.render_widget(paragraph, area);
}
