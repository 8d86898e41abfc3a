//! Rich diagnostic error types for the reading shelf.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from shelf operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ShelfError {
    #[error("book not found on shelf: \"{id}\"")]
    #[diagnostic(
        code(estante::shelf::not_found),
        help(
            "No shelf entry with this ID exists. \
             List your shelf with `estante shelf list`."
        )
    )]
    NotFound { id: String },

    #[error("duplicate book: \"{id}\" is already on the shelf")]
    #[diagnostic(
        code(estante::shelf::duplicate),
        help(
            "This book was already added. Update it with `estante shelf update {id}`, \
             or remove it first."
        )
    )]
    Duplicate { id: String },

    #[error("invalid rating: {rating}")]
    #[diagnostic(
        code(estante::shelf::invalid_rating),
        help("Ratings are stars from 1 to 5.")
    )]
    InvalidRating { rating: u8 },

    #[error("shelf I/O error: {message}")]
    #[diagnostic(
        code(estante::shelf::store_io),
        help(
            "Failed to read or write the shelf file. Check that the data \
             directory exists and has correct permissions."
        )
    )]
    StoreIo { message: String },
}

/// Convenience alias for shelf operation results.
pub type ShelfResult<T> = std::result::Result<T, ShelfError>;
