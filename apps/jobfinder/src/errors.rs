use thiserror::Error;

use crate::router::Screen;

/// Input rejected before any network call. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a job search query.")]
    EmptyQuery,

    #[error("Please select a resume file to upload.")]
    NoFile,

    #[error("Please upload a single resume file.")]
    MultipleFiles,

    #[error("Invalid file type. Please upload a PDF or TXT file.")]
    UnsupportedType,

    #[error("The selected file is empty. Please choose another resume.")]
    EmptyFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("Cannot move from {from:?} to {to:?}")]
    IllegalTransition { from: Screen, to: Screen },

    #[error("Submit belongs to {expected:?}, but {actual:?} is active")]
    WrongScreen { expected: Screen, actual: Screen },

    #[error("A search is already in progress")]
    Busy,
}
