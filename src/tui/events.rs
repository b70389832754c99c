use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

use crate::tui::App;
use crate::tui::app::{GoalField, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::parse_key_binding;

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's
/// terminal would be unusable after an abnormal exit.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Whether a key event matches a configured binding string.
fn matches_binding(binding: &str, key: &KeyEvent) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key.code == parsed.key_code
                && parsed.requires_ctrl == key.modifiers.contains(KeyModifiers::CONTROL)
        }
        Err(_) => false,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal.
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            crate::tui::render(f, &mut app, &layout);
        })?;

        // Short poll so status messages clear without a key press
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(&mut app, key)?;
        }

        if app.should_quit {
            break;
        }
    }

    guard.restore()?;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), TuiError> {
    match app.mode.clone() {
        Mode::View => handle_view_key(app, key),
        Mode::SearchInput => handle_search_key(app, key),
        Mode::ShelfPick => handle_shelf_pick_key(app, key),
        Mode::ProgressInput => handle_input_key(app, key, |app| app.submit_progress()),
        Mode::GoalInput(field) => handle_input_key(app, key, move |app| app.submit_goal(field)),
        Mode::NoteInput => handle_text_key(app, key, |app| app.submit_note()),
        Mode::ConfirmRemove => handle_confirm_key(app, key),
        Mode::Help => {
            app.mode = Mode::View;
            Ok(())
        }
    }
}

fn handle_view_key(app: &mut App, key: KeyEvent) -> Result<(), TuiError> {
    let bindings = app.config.key_bindings.clone();

    if matches_binding(&bindings.quit, &key) {
        app.should_quit = true;
        return Ok(());
    }
    if matches_binding(&bindings.help, &key) {
        app.mode = Mode::Help;
        return Ok(());
    }
    if matches_binding(&bindings.tab_left, &key) {
        return app.previous_tab();
    }
    if matches_binding(&bindings.tab_right, &key) {
        return app.next_tab();
    }
    let tab_jumps = [
        (&bindings.tab_1, Tab::Home),
        (&bindings.tab_2, Tab::Search),
        (&bindings.tab_3, Tab::Shelves),
        (&bindings.tab_4, Tab::Goals),
        (&bindings.tab_5, Tab::Stats),
    ];
    for (binding, tab) in tab_jumps {
        if matches_binding(binding, &key) {
            return app.select_tab(tab);
        }
    }

    if matches_binding(&bindings.list_down, &key) || key.code == KeyCode::Down {
        app.move_selection_down();
        return Ok(());
    }
    if matches_binding(&bindings.list_up, &key) || key.code == KeyCode::Up {
        app.move_selection_up();
        return Ok(());
    }

    if matches_binding(&bindings.search, &key) {
        if app.current_tab != Tab::Search {
            app.select_tab(Tab::Search)?;
        }
        app.mode = Mode::SearchInput;
        return Ok(());
    }

    if app.current_tab == Tab::Shelves && key.code == KeyCode::Char('n') {
        app.begin_note();
        return Ok(());
    }

    // Goal edits take priority over same-letter global bindings on that tab.
    if app.current_tab == Tab::Goals {
        if key.code == KeyCode::Char('y') {
            app.begin_goal_edit(GoalField::Yearly);
            return Ok(());
        }
        if key.code == KeyCode::Char('m') {
            app.begin_goal_edit(GoalField::Monthly);
            return Ok(());
        }
    }

    if matches_binding(&bindings.shelf_cycle, &key) && app.current_tab == Tab::Shelves {
        app.cycle_shelf_tab();
        return Ok(());
    }
    if matches_binding(&bindings.add, &key)
        && matches!(app.current_tab, Tab::Home | Tab::Search)
    {
        app.begin_add();
        return Ok(());
    }
    if matches_binding(&bindings.delete, &key) {
        app.begin_remove();
        return Ok(());
    }
    if matches_binding(&bindings.progress, &key) {
        app.begin_progress();
        return Ok(());
    }
    if matches_binding(&bindings.toggle_theme, &key) {
        return app.toggle_theme();
    }
    if key.code == KeyCode::Char('e') {
        return app.export_library();
    }

    Ok(())
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Result<(), TuiError> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.mode = Mode::View;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.run_search();
        }
        // Results filter as the query is typed, like a search-as-you-type box
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.run_search();
        }
        _ => {}
    }
    Ok(())
}

fn handle_shelf_pick_key(app: &mut App, key: KeyEvent) -> Result<(), TuiError> {
    match key.code {
        KeyCode::Esc => {
            app.pending_book = None;
            app.mode = Mode::View;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.shelf_pick_index = app.shelf_pick_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.shelf_pick_index = (app.shelf_pick_index + 1).min(2);
        }
        KeyCode::Enter => {
            app.confirm_shelf_pick()?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_input_key<F>(app: &mut App, key: KeyEvent, submit: F) -> Result<(), TuiError>
where
    F: FnOnce(&mut App) -> Result<(), TuiError>,
{
    match key.code {
        KeyCode::Esc => {
            app.input_buffer.clear();
            app.mode = Mode::View;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.input_buffer.push(c);
        }
        KeyCode::Enter => {
            submit(app)?;
            app.input_buffer.clear();
        }
        _ => {}
    }
    Ok(())
}

/// Free-text variant of the input prompt handler.
fn handle_text_key<F>(app: &mut App, key: KeyEvent, submit: F) -> Result<(), TuiError>
where
    F: FnOnce(&mut App) -> Result<(), TuiError>,
{
    match key.code {
        KeyCode::Esc => {
            app.input_buffer.clear();
            app.mode = Mode::View;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        KeyCode::Enter => {
            submit(app)?;
            app.input_buffer.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) -> Result<(), TuiError> {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::View;
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') => {
            app.confirm_index = 1 - app.confirm_index;
        }
        KeyCode::Enter => {
            if app.confirm_index == 0 {
                app.confirm_remove()?;
            } else {
                app.mode = Mode::View;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn bindings_match_plain_and_ctrl_keys() {
        assert!(matches_binding("q", &key(KeyCode::Char('q'))));
        assert!(!matches_binding("q", &key(KeyCode::Char('x'))));
        assert!(matches_binding(
            "Ctrl+e",
            &KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL)
        ));
        // A plain binding must not fire while Ctrl is held.
        assert!(!matches_binding(
            "e",
            &KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL)
        ));
    }
}
