use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A book record as it lives on a shelf. Field names follow the persisted
/// JSON layout (camelCase, `wantToRead` etc.) so existing data stays readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    /// RFC 3339 timestamp stamped when the book reaches the Read shelf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

impl Book {
    pub fn new(title: String, author: String) -> Self {
        Self {
            id: 0,
            title,
            author,
            rating: None,
            pages: None,
            published: None,
            color: None,
            description: None,
            current_page: None,
            completed_date: None,
        }
    }

    /// Progress through the book as a 0-100 percentage.
    pub fn progress_percent(&self) -> u16 {
        let pages = self.pages.unwrap_or(0);
        if pages <= 0 {
            return 0;
        }
        let current = self.current_page.unwrap_or(0).clamp(0, pages);
        ((current * 100) / pages) as u16
    }
}

/// One of the three shelves a book can be organized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    Read,
    Reading,
    WantToRead,
}

impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::Read, Shelf::Reading, Shelf::WantToRead];

    /// Key used inside the persisted `myBooks` blob.
    pub fn key(self) -> &'static str {
        match self {
            Shelf::Read => "read",
            Shelf::Reading => "reading",
            Shelf::WantToRead => "wantToRead",
        }
    }

    /// Human-facing label as shown in tabs and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Shelf::Read => "Read",
            Shelf::Reading => "Reading",
            Shelf::WantToRead => "Want to Read",
        }
    }

    pub fn parse(s: &str) -> Option<Shelf> {
        match s {
            "read" | "Read" => Some(Shelf::Read),
            "reading" | "Reading" => Some(Shelf::Reading),
            "wantToRead" | "want-to-read" | "Want to Read" => Some(Shelf::WantToRead),
            _ => None,
        }
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The whole `myBooks` blob: three ordered shelves, always read and written
/// in their entirety.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelves {
    #[serde(default)]
    pub read: Vec<Book>,
    #[serde(default)]
    pub reading: Vec<Book>,
    #[serde(default)]
    pub want_to_read: Vec<Book>,
}

impl Shelves {
    pub fn books(&self, shelf: Shelf) -> &Vec<Book> {
        match shelf {
            Shelf::Read => &self.read,
            Shelf::Reading => &self.reading,
            Shelf::WantToRead => &self.want_to_read,
        }
    }

    pub fn books_mut(&mut self, shelf: Shelf) -> &mut Vec<Book> {
        match shelf {
            Shelf::Read => &mut self.read,
            Shelf::Reading => &mut self.reading,
            Shelf::WantToRead => &mut self.want_to_read,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub initials: String,
    pub rating: i64,
    pub text: String,
    /// Seed reviews carry no date; user reviews are stamped at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    /// Page reference as entered by the user, or "N/A".
    pub page: String,
    pub date: String,
}

/// Mapping from book id (stringified, as JSON object keys are) to the entries
/// recorded for that book. BTreeMap keeps the serialized form stable.
pub type AnnotationMap<T> = BTreeMap<String, Vec<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingGoals {
    #[serde(default = "default_yearly_goal")]
    pub yearly: i64,
    #[serde(default = "default_monthly_goal")]
    pub monthly: i64,
}

impl Default for ReadingGoals {
    fn default() -> Self {
        Self {
            yearly: default_yearly_goal(),
            monthly: default_monthly_goal(),
        }
    }
}

fn default_yearly_goal() -> i64 {
    12
}

fn default_monthly_goal() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// The bare string persisted under the `themeMode` key. The original data
    /// format stored the string without JSON quoting, so this round-trips it.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<ThemeMode> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let mut book = Book::new("Educated".to_string(), "Tara Westover".to_string());
        book.id = 3;
        book.pages = Some(385);
        book.current_page = Some(100);
        book.completed_date = Some("2024-01-15T10:00:00Z".to_string());

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["currentPage"], 100);
        assert_eq!(json["completedDate"], "2024-01-15T10:00:00Z");
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn shelves_blob_uses_want_to_read_key() {
        let shelves = Shelves::default();
        let json = serde_json::to_value(&shelves).unwrap();
        assert!(json.get("wantToRead").is_some());
        assert!(json.get("want_to_read").is_none());
    }

    #[test]
    fn shelf_parses_labels_and_keys() {
        assert_eq!(Shelf::parse("wantToRead"), Some(Shelf::WantToRead));
        assert_eq!(Shelf::parse("Want to Read"), Some(Shelf::WantToRead));
        assert_eq!(Shelf::parse("bogus"), None);
        assert_eq!(Shelf::Reading.key(), "reading");
    }

    #[test]
    fn goals_default_missing_fields() {
        let goals: ReadingGoals = serde_json::from_str("{\"yearly\": 24}").unwrap();
        assert_eq!(goals.yearly, 24);
        assert_eq!(goals.monthly, 1);
    }

    #[test]
    fn progress_percent_clamps() {
        let mut book = Book::new("t".into(), "a".into());
        book.pages = Some(100);
        book.current_page = Some(250);
        assert_eq!(book.progress_percent(), 100);
        book.pages = None;
        assert_eq!(book.progress_percent(), 0);
    }
}
