use thiserror::Error;

use crate::export::ExportError;
use crate::goals::GoalError;
use crate::shelves::ShelfError;
use crate::theme::ThemeError;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Shelf error: {0}")]
    ShelfError(#[from] ShelfError),

    #[error("Goal error: {0}")]
    GoalError(#[from] GoalError),

    #[error("Theme error: {0}")]
    ThemeError(#[from] ThemeError),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Render error: {0}")]
    RenderError(String),
}
