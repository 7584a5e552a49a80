// Central Error Type for the Application

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error on {path}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Provided folder with DICOM images does not exist: {0}")]
    DicomFolderMissing(PathBuf),

    #[error("No NIfTI files found in the temporary folder: {0}")]
    NoImages(PathBuf),

    #[error("Cannot read image header of {path}: {reason}")]
    Inspection { path: PathBuf, reason: String },

    #[error("Conversion error: {0}")]
    Conversion(#[from] crate::port::ConversionError),

    #[error("Input ended before the operator answered: {0}")]
    Aborted(String),
}

impl AppError {
    /// Attach the offending path to an IO error
    pub fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> AppError {
        let path = path.into();
        move |source| AppError::PathIo { path, source }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
