pub mod book_list;
pub mod color;
pub mod confirm_remove;
pub mod help;
pub mod prompt;
pub mod shelf_pick;
pub mod status_bar;
pub mod tabs;
