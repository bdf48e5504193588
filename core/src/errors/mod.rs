mod capture_error;
mod parse_error;

pub use capture_error::{CaptureError, ResolveError, WalkError};
pub use parse_error::ParseError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping all dexstack errors.
#[derive(Debug, Error, Diagnostic)]
pub enum TraceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Capture(#[from] CaptureError),
}
