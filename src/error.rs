//! Error handling for the quire application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for quire operations.
///
/// Every variant is fatal to the current composition. Recoverable conditions
/// (unknown tokens, unknown forced article, absent optional fields) never
/// surface here; they resolve to a fallback at the point they occur.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    /// or while writing to the output sink
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The template markup could not be tokenized.
    #[error("{name}:{line}:{column}: {message}")]
    ParseError { name: String, line: usize, column: usize, message: String },

    /// The template ended while a marked element was still open.
    #[error("{name}: unbalanced template, input ended inside {state}")]
    UnbalancedTemplateError { name: String, state: String },

    /// Represents errors that occur while parsing an article manifest
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// A single manifest entry could not be turned into an article.
    #[error("Article '{article}': {message}.")]
    ArticleError { article: String, message: String },

    #[error("Template '{template}' does not exist or is not a regular file.")]
    TemplateDoesNotExistsError { template: String },
}

/// Convenience type alias for Results with Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
