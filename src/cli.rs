use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::annotations::{AnnotationError, NoteStore, QuoteStore, ReviewStore};
use crate::catalog;
use crate::export::{self, ExportError};
use crate::goals::{GoalError, GoalStore};
use crate::models::{Book, Shelf, ThemeMode};
use crate::shelves::{ProgressOutcome, ShelfError, ShelfStore};
use crate::stats;
use crate::storage::Storage;
use crate::theme::{ThemeError, ThemeStore};
use crate::utils::display_date;

#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(about = "A personal reading tracker - shelves, goals, and statistics")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Search the catalog by title or author
    Search {
        /// Search query
        query: String,
    },
    /// Add a book to a shelf
    Add {
        /// Book title
        title: String,
        /// Book author
        #[arg(long)]
        author: String,
        /// Target shelf: read, reading, or want-to-read
        #[arg(long, default_value = "want-to-read")]
        shelf: String,
        /// Page count
        #[arg(long)]
        pages: Option<i64>,
    },
    /// Remove a book from a shelf
    Remove {
        /// Book id
        id: i64,
        /// Shelf to remove from: read, reading, or want-to-read
        #[arg(long)]
        shelf: String,
    },
    /// Update reading progress for a book on the Reading shelf
    Progress {
        /// Book id
        id: i64,
        /// Current page
        page: i64,
    },
    /// List all shelves and their books
    Shelves,
    /// Show reviews for a book, or add one
    Review {
        /// Book id
        id: i64,
        /// Review text; omit to list existing reviews
        text: Option<String>,
        /// Star rating (1-5), required when adding
        #[arg(long)]
        rating: Option<i64>,
    },
    /// Delete a review
    Unreview {
        /// Book id
        id: i64,
        /// Review id
        review_id: i64,
    },
    /// Show notes for a book, or add one
    Note {
        /// Book id
        id: i64,
        /// Note text; omit to list existing notes
        text: Option<String>,
    },
    /// Delete a note
    Unnote {
        /// Book id
        id: i64,
        /// Note id
        note_id: i64,
    },
    /// Show quotes for a book, or add one
    Quote {
        /// Book id
        id: i64,
        /// Quote text; omit to list existing quotes
        text: Option<String>,
        /// Page reference
        #[arg(long)]
        page: Option<String>,
    },
    /// Delete a quote
    Unquote {
        /// Book id
        id: i64,
        /// Quote id
        quote_id: i64,
    },
    /// Show or set reading goals
    Goals {
        /// Yearly target
        #[arg(long)]
        yearly: Option<i64>,
        /// Monthly target
        #[arg(long)]
        monthly: Option<i64>,
    },
    /// Show reading statistics
    Stats,
    /// Export the whole library as JSON (printed and copied to the clipboard)
    Export,
    /// Show or set the theme mode: light, dark, or system
    Theme {
        /// New mode; omit to show the current one
        mode: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Shelf error: {0}")]
    ShelfError(#[from] ShelfError),
    #[error("Annotation error: {0}")]
    AnnotationError(#[from] AnnotationError),
    #[error("Goal error: {0}")]
    GoalError(#[from] GoalError),
    #[error("Theme error: {0}")]
    ThemeError(#[from] ThemeError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
    #[error("Unknown shelf: {0} (expected read, reading, or want-to-read)")]
    UnknownShelf(String),
    #[error("Unknown theme mode: {0} (expected light, dark, or system)")]
    UnknownThemeMode(String),
    #[error("A rating is required when adding a review (--rating 1-5)")]
    MissingRating,
}

fn parse_shelf(name: &str) -> Result<Shelf, CliError> {
    Shelf::parse(name).ok_or_else(|| CliError::UnknownShelf(name.to_string()))
}

fn print_book(book: &Book) {
    let mut line = format!("  [{}] {} - {}", book.id, book.title, book.author);
    if let Some(pages) = book.pages {
        match book.current_page {
            Some(current) => line.push_str(&format!(" ({}/{} pages)", current, pages)),
            None => line.push_str(&format!(" ({} pages)", pages)),
        }
    }
    if let Some(date) = &book.completed_date {
        line.push_str(&format!(" - finished {}", display_date(date)));
    }
    println!("{}", line);
}

/// Handle the search command
pub fn handle_search(query: String) -> Result<(), CliError> {
    let results = catalog::search(&query);
    if results.is_empty() {
        println!("No books found for '{}'", query);
        return Ok(());
    }
    println!("{} found", results.len());
    for book in &results {
        let rating = book.rating.unwrap_or(0.0);
        println!("  {} - {} ({:.1} stars)", book.title, book.author, rating);
    }
    Ok(())
}

/// Handle the add command
pub fn handle_add<S: Storage>(
    title: String,
    author: String,
    shelf: String,
    pages: Option<i64>,
    storage: &S,
) -> Result<(), CliError> {
    let shelf = parse_shelf(&shelf)?;
    let store = ShelfStore::new(storage);

    let mut book = Book::new(title, author);
    book.pages = pages;
    let added = store.add(&book, shelf)?;
    println!("Added '{}' to {} (ID: {})", added.title, shelf.label(), added.id);
    Ok(())
}

/// Handle the remove command
pub fn handle_remove<S: Storage>(id: i64, shelf: String, storage: &S) -> Result<(), CliError> {
    let shelf = parse_shelf(&shelf)?;
    let store = ShelfStore::new(storage);
    store.remove(shelf, id)?;
    println!("Removed book {} from {}", id, shelf.label());
    Ok(())
}

/// Handle the progress command
pub fn handle_progress<S: Storage>(id: i64, page: i64, storage: &S) -> Result<(), CliError> {
    let store = ShelfStore::new(storage);
    match store.update_progress(id, page)? {
        ProgressOutcome::Updated => println!("Progress saved: page {}", page),
        ProgressOutcome::Completed => println!("Book finished - moved to the Read shelf"),
        ProgressOutcome::AlreadyRead => println!("Book finished - already on the Read shelf"),
        ProgressOutcome::NotFound => println!("No book with id {} on your shelves", id),
    }
    Ok(())
}

/// Handle the shelves command
pub fn handle_shelves<S: Storage>(storage: &S) -> Result<(), CliError> {
    let store = ShelfStore::new(storage);
    let shelves = store.load()?;
    for shelf in Shelf::ALL {
        let books = shelves.books(shelf);
        println!("{} ({})", shelf.label(), books.len());
        for book in books {
            print_book(book);
        }
    }
    Ok(())
}

/// Handle the review command
pub fn handle_review<S: Storage>(
    id: i64,
    text: Option<String>,
    rating: Option<i64>,
    storage: &S,
) -> Result<(), CliError> {
    let store = ReviewStore::new(storage);
    let reviews = match text {
        Some(text) => {
            let rating = rating.ok_or(CliError::MissingRating)?;
            let reviews = store.add(id, rating, &text)?;
            println!("Review saved");
            reviews
        }
        None => store.list(id)?,
    };
    for review in &reviews {
        let date = review.date.as_deref().map(display_date);
        match date {
            Some(date) => println!(
                "  [{}] {} ({} stars, {}): {}",
                review.id, review.name, review.rating, date, review.text
            ),
            None => println!(
                "  [{}] {} ({} stars): {}",
                review.id, review.name, review.rating, review.text
            ),
        }
    }
    Ok(())
}

/// Handle the unreview command
pub fn handle_unreview<S: Storage>(id: i64, review_id: i64, storage: &S) -> Result<(), CliError> {
    ReviewStore::new(storage).remove(id, review_id)?;
    println!("Review removed");
    Ok(())
}

/// Handle the note command
pub fn handle_note<S: Storage>(
    id: i64,
    text: Option<String>,
    storage: &S,
) -> Result<(), CliError> {
    let store = NoteStore::new(storage);
    let notes = match text {
        Some(text) => {
            let notes = store.add(id, &text)?;
            println!("Note saved");
            notes
        }
        None => store.list(id)?,
    };
    for note in &notes {
        println!("  [{}] {}: {}", note.id, display_date(&note.date), note.text);
    }
    Ok(())
}

/// Handle the unnote command
pub fn handle_unnote<S: Storage>(id: i64, note_id: i64, storage: &S) -> Result<(), CliError> {
    NoteStore::new(storage).remove(id, note_id)?;
    println!("Note removed");
    Ok(())
}

/// Handle the quote command
pub fn handle_quote<S: Storage>(
    id: i64,
    text: Option<String>,
    page: Option<String>,
    storage: &S,
) -> Result<(), CliError> {
    let store = QuoteStore::new(storage);
    let quotes = match text {
        Some(text) => {
            let quotes = store.add(id, &text, page.as_deref())?;
            println!("Quote saved");
            quotes
        }
        None => store.list(id)?,
    };
    for quote in &quotes {
        println!("  [{}] \"{}\" (p. {})", quote.id, quote.text, quote.page);
    }
    Ok(())
}

/// Handle the unquote command
pub fn handle_unquote<S: Storage>(id: i64, quote_id: i64, storage: &S) -> Result<(), CliError> {
    QuoteStore::new(storage).remove(id, quote_id)?;
    println!("Quote removed");
    Ok(())
}

/// Handle the goals command
pub fn handle_goals<S: Storage>(
    yearly: Option<i64>,
    monthly: Option<i64>,
    storage: &S,
) -> Result<(), CliError> {
    let store = GoalStore::new(storage);
    let goals = if yearly.is_some() || monthly.is_some() {
        let current = store.load()?;
        let goals = store.save(
            yearly.unwrap_or(current.yearly),
            monthly.unwrap_or(current.monthly),
        )?;
        println!("Goals updated");
        goals
    } else {
        store.load()?
    };
    println!("Yearly goal:  {} books", goals.yearly);
    println!("Monthly goal: {} books", goals.monthly);
    Ok(())
}

/// Handle the stats command
pub fn handle_stats<S: Storage>(storage: &S) -> Result<(), CliError> {
    let shelf_store = ShelfStore::new(storage);
    let shelves = shelf_store.load()?;
    let stats = stats::compute_today(&shelves.read);
    let goals = GoalStore::new(storage).load()?;
    let (yearly_pct, monthly_pct) = stats::goal_progress(&stats, &goals);

    let avg_pages = if stats.total_books == 0 {
        0
    } else {
        stats.total_pages / stats.total_books as i64
    };
    println!("Books read:      {}", stats.total_books);
    println!("Pages read:      {}", stats.total_pages);
    println!("Avg pages/book:  {}", avg_pages);
    println!("Average rating:  {:.1}", stats.average_rating);
    println!("This year:       {} ({}% of {})", stats.books_this_year, yearly_pct, goals.yearly);
    println!("This month:      {} ({}% of {})", stats.books_this_month, monthly_pct, goals.monthly);
    println!("Reading streak:  {} days", stats.reading_streak);
    Ok(())
}

/// Handle the export command
pub fn handle_export<S: Storage>(storage: &S) -> Result<(), CliError> {
    let document = export::export_library(storage)?;
    println!("{}", document);

    // Clipboard is best effort; a headless session still gets the stdout copy.
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(document)) {
        Ok(()) => println!("Library exported and copied to clipboard"),
        Err(e) => eprintln!("Clipboard unavailable ({}), export printed above", e),
    }
    Ok(())
}

/// Handle the theme command
pub fn handle_theme<S: Storage>(mode: Option<String>, storage: &S) -> Result<(), CliError> {
    let store = ThemeStore::new(storage);
    match mode {
        Some(raw) => {
            let mode = ThemeMode::parse(&raw).ok_or(CliError::UnknownThemeMode(raw))?;
            store.set_mode(mode)?;
            println!("Theme set to {}", mode);
        }
        None => println!("Theme: {}", store.load()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn add_rejects_unknown_shelves() {
        let storage = MemoryStorage::new();
        let result = handle_add(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "favorites".to_string(),
            None,
            &storage,
        );
        assert!(matches!(result, Err(CliError::UnknownShelf(_))));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn add_accepts_hyphenated_shelf_name() {
        let storage = MemoryStorage::new();
        handle_add(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "want-to-read".to_string(),
            Some(688),
            &storage,
        )
        .unwrap();

        let shelves = ShelfStore::new(&storage).load().unwrap();
        assert_eq!(shelves.want_to_read.len(), 1);
        assert_eq!(shelves.want_to_read[0].title, "Dune");
    }

    #[test]
    fn review_without_rating_is_refused() {
        let storage = MemoryStorage::new();
        let result = handle_review(1, Some("great".to_string()), None, &storage);
        assert!(matches!(result, Err(CliError::MissingRating)));
    }

    #[test]
    fn theme_rejects_unknown_mode() {
        let storage = MemoryStorage::new();
        let result = handle_theme(Some("sepia".to_string()), &storage);
        assert!(matches!(result, Err(CliError::UnknownThemeMode(_))));
    }
}
