//! Error types for the catalog crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants for different error cases
//! - Error messages with context
//! - Automatic `Display` and `Error` trait implementations

use thiserror::Error;

/// Errors that can occur during catalog loading and validation
///
/// Rust concept: Using an enum for errors lets us handle different cases.
/// The `#[derive(Error)]` macro from thiserror automatically implements
/// the `std::error::Error` trait and `Display` based on our `#[error(...)]` attributes.
///
/// Note that an individual malformed dataset record is NOT an error: bad
/// lines are skipped with a logged warning so one broken record can never
/// take down the whole catalog. These variants cover faults that make the
/// catalog itself unusable.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A dataset file produced no usable records at all
    ///
    /// This variant stores context about where parsing first went wrong
    #[error("No usable records in {file}; first failure at line {line}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., review for an unknown restaurant)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
///
/// Rust concept: Type aliases make code more readable
/// Instead of writing `Result<T, CatalogError>` everywhere,
/// we can write `Result<T>`
pub type Result<T> = std::result::Result<T, CatalogError>;
