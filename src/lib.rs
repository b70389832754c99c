pub mod annotations;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod export;
pub mod goals;
pub mod models;
pub mod shelves;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Book, ReadingGoals, Shelf, Shelves, ThemeMode};
pub use shelves::ShelfStore;
pub use storage::{SqliteStorage, Storage};
pub use utils::Profile;
