use miette::Diagnostic;
use thiserror::Error;

use crate::walker::MethodHandle;

/// Failure reported by the stack-walking capability itself.
#[derive(Debug, Error, Diagnostic)]
pub enum WalkError {
    #[error("invalid thread context: {0}")]
    InvalidContext(String),

    #[error("stack walk aborted: {0}")]
    Aborted(String),
}

/// Failure reported by the line-resolution capability.
#[derive(Debug, Error, Diagnostic)]
#[error("line resolution failed for method {method:?} at dex pc {dex_pc:#x}: {message}")]
#[diagnostic(help("resolution failures usually indicate a corrupted or incompatible runtime state"))]
pub struct ResolveError {
    pub method: MethodHandle,
    pub dex_pc: u32,
    pub message: String,
}

impl ResolveError {
    pub fn new(method: MethodHandle, dex_pc: u32, message: impl Into<String>) -> Self {
        Self {
            method,
            dex_pc,
            message: message.into(),
        }
    }
}

/// What a failed snapshot returns.
///
/// A snapshot that fails is always an `Err`; it never degrades into an
/// empty sequence, so callers can tell "no frames retained" apart from
/// "capture failed".
#[derive(Debug, Error, Diagnostic)]
pub enum CaptureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}
