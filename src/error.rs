use crate::geo::ParseGeofenceModeError;
use crate::gps::GpsDecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the photo-location crate.
///
/// Only up-front parameter problems surface here; malformed GPS data inside a
/// photo is reported per item as a [`crate::structs::LocationOutcome`] so one
/// bad file can never abort a sweep.
#[derive(Error, Debug)]
pub enum PhotoLocationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    // --- Custom Module Errors ---
    #[error("GPS decoding failed: {0}")]
    Decode(#[from] GpsDecodeError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParseGeofenceModeError),

    // --- Input Validation Errors ---
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Unsupported photo format {extension:?}: {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
}
