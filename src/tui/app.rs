use ratatui::widgets::ListState;
use std::time::Instant;

use crate::Config;
use crate::annotations::NoteStore;
use crate::catalog;
use crate::export;
use crate::goals::{GoalStore, parse_goal_input};
use crate::models::{Book, ReadingGoals, Shelf, Shelves, ThemeMode};
use crate::shelves::{ProgressOutcome, ShelfStore};
use crate::stats::{self, ReadingStats};
use crate::storage::SqliteStorage;
use crate::theme::{self, Palette, ThemeStore};
use crate::tui::error::TuiError;

/// How long a status message stays on screen before auto-clearing
const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Search,
    Shelves,
    Goals,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Search, Tab::Shelves, Tab::Goals, Tab::Stats];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Shelves => "Shelves",
            Tab::Goals => "Goals",
            Tab::Stats => "Stats",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Search => 1,
            Tab::Shelves => 2,
            Tab::Goals => 3,
            Tab::Stats => 4,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Which goal the goal input prompt is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalField {
    Yearly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    View,
    /// Typing into the search bar on the Search tab
    SearchInput,
    /// Choosing a shelf for the pending catalog book
    ShelfPick,
    /// Entering a page number for the selected Reading book
    ProgressInput,
    /// Entering a new goal value
    GoalInput(GoalField),
    /// Writing a note for the selected shelf book
    NoteInput,
    /// Confirming removal of the selected shelf book
    ConfirmRemove,
    Help,
}

pub struct App {
    pub config: Config,
    pub storage: SqliteStorage,
    pub current_tab: Tab,
    pub mode: Mode,

    pub shelves: Shelves,
    pub shelf_tab: Shelf,
    pub goals: ReadingGoals,
    pub stats: ReadingStats,
    pub theme_mode: ThemeMode,
    pub palette: &'static Palette,

    pub recommendations: Vec<Book>,
    pub search_query: String,
    pub search_results: Vec<Book>,

    pub list_state: ListState,
    /// Book staged by an add, waiting for a shelf choice
    pub pending_book: Option<Book>,
    pub shelf_pick_index: usize,
    pub confirm_index: usize,
    pub input_buffer: String,

    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, storage: SqliteStorage) -> Result<Self, TuiError> {
        let mut app = Self {
            config,
            storage,
            current_tab: Tab::Home,
            mode: Mode::View,
            shelves: Shelves::default(),
            shelf_tab: Shelf::Reading,
            goals: ReadingGoals::default(),
            stats: ReadingStats::default(),
            theme_mode: ThemeMode::System,
            palette: &theme::LIGHT,
            recommendations: catalog::recommendations(),
            search_query: String::new(),
            search_results: catalog::all_books(),
            list_state: ListState::default(),
            pending_book: None,
            shelf_pick_index: 0,
            confirm_index: 0,
            input_buffer: String::new(),
            status_message: None,
            status_message_time: None,
            should_quit: false,
        };
        app.reload()?;
        app.list_state.select(Some(0));
        Ok(app)
    }

    /// Re-read every store from storage. Runs on startup and on each tab
    /// switch, so edits made through the CLI show up without restarting.
    pub fn reload(&mut self) -> Result<(), TuiError> {
        self.shelves = ShelfStore::new(&self.storage).load()?;
        self.goals = GoalStore::new(&self.storage).load()?;
        self.stats = stats::compute_today(&self.shelves.read);
        self.theme_mode = ThemeStore::new(&self.storage).load()?;
        self.palette = theme::resolve(self.theme_mode, self.config.host_appearance());
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), TuiError> {
        self.current_tab = tab;
        self.mode = Mode::View;
        self.list_state.select(Some(0));
        self.reload()
    }

    pub fn next_tab(&mut self) -> Result<(), TuiError> {
        self.select_tab(self.current_tab.next())
    }

    pub fn previous_tab(&mut self) -> Result<(), TuiError> {
        self.select_tab(self.current_tab.previous())
    }

    /// The list the selection cursor moves through on the current tab.
    pub fn visible_books(&self) -> &[Book] {
        match self.current_tab {
            Tab::Home => &self.recommendations,
            Tab::Search => &self.search_results,
            Tab::Shelves => self.shelves.books(self.shelf_tab),
            Tab::Goals | Tab::Stats => &[],
        }
    }

    pub fn selected_book(&self) -> Option<&Book> {
        let index = self.list_state.selected()?;
        self.visible_books().get(index)
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_selection_up(&mut self) {
        if self.visible_books().is_empty() {
            return;
        }
        let previous = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(previous));
    }

    pub fn cycle_shelf_tab(&mut self) {
        self.shelf_tab = match self.shelf_tab {
            Shelf::Read => Shelf::Reading,
            Shelf::Reading => Shelf::WantToRead,
            Shelf::WantToRead => Shelf::Read,
        };
        self.list_state.select(Some(0));
    }

    pub fn run_search(&mut self) {
        self.search_results = catalog::search(&self.search_query);
        self.list_state.select(Some(0));
    }

    /// Stage the selected catalog book and open the shelf picker.
    pub fn begin_add(&mut self) {
        if let Some(book) = self.selected_book().cloned() {
            self.pending_book = Some(book);
            self.shelf_pick_index = 0;
            self.mode = Mode::ShelfPick;
        }
    }

    pub fn confirm_shelf_pick(&mut self) -> Result<(), TuiError> {
        let shelf = Shelf::ALL[self.shelf_pick_index];
        if let Some(book) = self.pending_book.take() {
            let added = ShelfStore::new(&self.storage).add(&book, shelf)?;
            self.set_status(format!("Added '{}' to {}", added.title, shelf.label()));
            self.reload()?;
        }
        self.mode = Mode::View;
        Ok(())
    }

    pub fn begin_remove(&mut self) {
        if self.current_tab == Tab::Shelves && self.selected_book().is_some() {
            self.confirm_index = 0;
            self.mode = Mode::ConfirmRemove;
        }
    }

    pub fn confirm_remove(&mut self) -> Result<(), TuiError> {
        if let Some(book) = self.selected_book().cloned() {
            ShelfStore::new(&self.storage).remove(self.shelf_tab, book.id)?;
            self.set_status(format!("Removed '{}'", book.title));
            self.reload()?;
            let len = self.visible_books().len();
            if len == 0 {
                self.list_state.select(None);
            } else if self.list_state.selected().is_some_and(|i| i >= len) {
                self.list_state.select(Some(len - 1));
            }
        }
        self.mode = Mode::View;
        Ok(())
    }

    pub fn begin_progress(&mut self) {
        if self.current_tab != Tab::Shelves || self.shelf_tab != Shelf::Reading {
            return;
        }
        if let Some(book) = self.selected_book() {
            self.input_buffer = book
                .current_page
                .map(|p| p.to_string())
                .unwrap_or_default();
            self.mode = Mode::ProgressInput;
        }
    }

    pub fn submit_progress(&mut self) -> Result<(), TuiError> {
        let Some(book) = self.selected_book().cloned() else {
            self.mode = Mode::View;
            return Ok(());
        };
        let Ok(page) = self.input_buffer.trim().parse::<i64>() else {
            self.set_status("Please enter a valid page number".to_string());
            self.mode = Mode::View;
            return Ok(());
        };

        let outcome = ShelfStore::new(&self.storage).update_progress(book.id, page)?;
        match outcome {
            ProgressOutcome::Updated => self.set_status(format!("Progress saved: page {}", page)),
            ProgressOutcome::Completed => {
                self.set_status(format!("Finished '{}'!", book.title));
            }
            ProgressOutcome::AlreadyRead => {
                self.set_status(format!("'{}' was already on Read", book.title));
            }
            ProgressOutcome::NotFound => {
                self.set_status("Book is no longer on your shelves".to_string());
            }
        }
        self.reload()?;
        self.mode = Mode::View;
        Ok(())
    }

    pub fn begin_note(&mut self) {
        if self.current_tab == Tab::Shelves && self.selected_book().is_some() {
            self.input_buffer.clear();
            self.mode = Mode::NoteInput;
        }
    }

    pub fn submit_note(&mut self) -> Result<(), TuiError> {
        if let Some(book) = self.selected_book().cloned() {
            // Validation and storage failures both land in the status bar;
            // the note text stays unsaved either way.
            match NoteStore::new(&self.storage).add(book.id, &self.input_buffer) {
                Ok(_) => self.set_status(format!("Note added to '{}'", book.title)),
                Err(e) => self.set_status(e.to_string()),
            }
        }
        self.mode = Mode::View;
        Ok(())
    }

    pub fn begin_goal_edit(&mut self, field: GoalField) {
        let current = match field {
            GoalField::Yearly => self.goals.yearly,
            GoalField::Monthly => self.goals.monthly,
        };
        self.input_buffer = current.to_string();
        self.mode = Mode::GoalInput(field);
    }

    pub fn submit_goal(&mut self, field: GoalField) -> Result<(), TuiError> {
        match parse_goal_input(&self.input_buffer) {
            Ok(value) => {
                let store = GoalStore::new(&self.storage);
                let (yearly, monthly) = match field {
                    GoalField::Yearly => (value, self.goals.monthly),
                    GoalField::Monthly => (self.goals.yearly, value),
                };
                self.goals = store.save(yearly, monthly)?;
                self.stats = stats::compute_today(&self.shelves.read);
                self.set_status("Goals updated".to_string());
            }
            Err(e) => self.set_status(e.to_string()),
        }
        self.mode = Mode::View;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<(), TuiError> {
        let mode = ThemeStore::new(&self.storage).toggle(self.config.host_appearance())?;
        self.theme_mode = mode;
        self.palette = theme::resolve(mode, self.config.host_appearance());
        self.set_status(format!("Theme: {}", mode));
        Ok(())
    }

    pub fn export_library(&mut self) -> Result<(), TuiError> {
        let document = export::export_library(&self.storage)?;
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(document)) {
            Ok(()) => self.set_status("Library copied to clipboard".to_string()),
            Err(e) => self.set_status(format!("Clipboard unavailable: {}", e)),
        }
        Ok(())
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status_message_time
            && time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;

    fn test_app() -> App {
        let storage = SqliteStorage::open_in_memory().unwrap();
        App::new(Config::default(), storage).unwrap()
    }

    #[test]
    fn starts_on_home_with_seeded_shelves() {
        let app = test_app();
        assert_eq!(app.current_tab, Tab::Home);
        assert_eq!(app.shelves.read.len(), 3);
        assert_eq!(app.recommendations.len(), 12);
    }

    #[test]
    fn tab_cycling_wraps_both_ways() {
        assert_eq!(Tab::Stats.next(), Tab::Home);
        assert_eq!(Tab::Home.previous(), Tab::Stats);
        assert_eq!(Tab::Home.next(), Tab::Search);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = test_app();
        app.select_tab(Tab::Shelves).unwrap();
        app.shelf_tab = Shelf::Reading;
        // Seeded Reading shelf has one book.
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.list_state.selected(), Some(0));
        app.move_selection_up();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn add_via_shelf_pick_persists_the_book() {
        let mut app = test_app();
        app.select_tab(Tab::Search).unwrap();
        app.search_query = "dune".to_string();
        app.run_search();
        app.begin_add();
        assert_eq!(app.mode, Mode::ShelfPick);
        app.shelf_pick_index = 2; // Want to Read
        app.confirm_shelf_pick().unwrap();

        assert_eq!(app.shelves.want_to_read.len(), 1);
        assert_eq!(app.shelves.want_to_read[0].title, "Dune");
        // The rest of the seed is gone once real data exists.
        assert!(app.shelves.read.is_empty());
    }

    #[test]
    fn search_updates_results_and_resets_selection() {
        let mut app = test_app();
        app.select_tab(Tab::Search).unwrap();
        app.search_query = "orwell".to_string();
        app.run_search();
        assert_eq!(app.search_results.len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn goal_edit_round_trips() {
        let mut app = test_app();
        app.select_tab(Tab::Goals).unwrap();
        app.begin_goal_edit(GoalField::Yearly);
        assert_eq!(app.input_buffer, "12");
        app.input_buffer = "24".to_string();
        app.submit_goal(GoalField::Yearly).unwrap();
        assert_eq!(app.goals.yearly, 24);
        assert_eq!(app.goals.monthly, 1);
    }

    #[test]
    fn invalid_goal_input_leaves_goals_alone() {
        let mut app = test_app();
        app.begin_goal_edit(GoalField::Monthly);
        app.input_buffer = "lots".to_string();
        app.submit_goal(GoalField::Monthly).unwrap();
        assert_eq!(app.goals.monthly, 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn note_entry_saves_through_the_note_store() {
        let mut app = test_app();
        app.select_tab(Tab::Shelves).unwrap();
        // Default shelf sub-tab is Reading, holding the seeded book (id 1).
        app.begin_note();
        assert_eq!(app.mode, Mode::NoteInput);
        app.input_buffer = "loved this chapter".to_string();
        app.submit_note().unwrap();

        let notes = NoteStore::new(&app.storage).list(1).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "loved this chapter");
    }

    #[test]
    fn empty_note_is_rejected_with_a_status_message() {
        let mut app = test_app();
        app.select_tab(Tab::Shelves).unwrap();
        app.begin_note();
        app.input_buffer = "   ".to_string();
        app.submit_note().unwrap();

        assert!(NoteStore::new(&app.storage).list(1).unwrap().is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn theme_toggle_swaps_the_palette() {
        let mut app = test_app();
        let before = app.palette.mode;
        app.toggle_theme().unwrap();
        assert_ne!(app.palette.mode, before);
    }
}
