//! Top-level error type for the estante crate.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives; this wrapper preserves the full diagnostic chain (error codes,
//! help text, sources) through to the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::providers::ProviderError;
use crate::shelf::ShelfError;

/// Any estante error.
#[derive(Debug, Error, Diagnostic)]
pub enum EstanteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Shelf(#[from] ShelfError),
}

/// Convenience alias for fallible estante operations.
pub type EstanteResult<T> = std::result::Result<T, EstanteError>;
