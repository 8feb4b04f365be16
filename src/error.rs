//! Error types for packing and cut planning.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes reported to the caller (UI or CLI exit status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Parts file not found (-1)
    FileNotFound = -1,
    /// Empty parts file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// Piece cannot be packed (E100)
    InvalidInput = 100,
    /// Packed piece has no matching part (E200)
    PartMatch = 200,
    /// Geometry parameters rejected (E300)
    InvalidConfig = 300,
}

/// Main error type for packing and planning.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("Piece length {length} exceeds stock length {capacity}")]
    InvalidInput { length: f64, capacity: f64 },

    #[error("Piece {index} has invalid length {length}: lengths must be positive")]
    InvalidPiece { index: usize, length: f64 },

    #[error("Cannot match packed piece length {length} to any remaining part")]
    PartMatch { length: f64 },

    #[error("Part {index} (length {length}) does not appear in the packing")]
    UnpackedPart { index: usize, length: f64 },

    #[error("Invalid value for '{field}': {value} (must be positive)")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid numeric value at line {line}: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("Invalid flag at line {line}: expected 0 or 1, got '{value}'")]
    InvalidFlag { line: usize, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CutError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CutError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CutError::InvalidPiece { .. } => ErrorCode::InvalidInput,
            CutError::PartMatch { .. } => ErrorCode::PartMatch,
            CutError::UnpackedPart { .. } => ErrorCode::PartMatch,
            CutError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            CutError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CutError::EmptyFile { .. } => ErrorCode::EmptyFile,
            CutError::ParseError { .. } => ErrorCode::ParseError,
            CutError::InvalidNumber { .. } => ErrorCode::ParseError,
            CutError::InvalidFlag { .. } => ErrorCode::ParseError,
            CutError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for packing and planning operations.
pub type Result<T> = std::result::Result<T, CutError>;
