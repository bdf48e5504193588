//! Capability seam to the runtime's source-line resolution primitive.

mod native;

pub use native::{NativeLineResolver, TranslateLocationFn};

use crate::errors::ResolveError;
use crate::walker::MethodHandle;

/// Resolved source position for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file name; `None` when the method carries no debug info.
    pub file: Option<String>,
    /// Source line; 0 when unresolved.
    pub line: i32,
}

/// Maps a method and dex pc to a source position.
pub trait LineResolver {
    /// Map a possibly optimized or inlined method identity back to its
    /// canonical declaring method.
    fn translate_method(&self, method: MethodHandle) -> MethodHandle;

    /// Resolve the source position of `dex_pc` within `method`.
    ///
    /// `method` must already be translated. When translation changed the
    /// identity, callers pass pc 0: the raw offset is only meaningful
    /// relative to the original method body.
    fn resolve_line(&self, method: MethodHandle, dex_pc: u32)
    -> Result<SourceLocation, ResolveError>;
}

/// Resolver for hosts without debug information: every frame maps to no
/// file and line 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl LineResolver for NullResolver {
    fn translate_method(&self, method: MethodHandle) -> MethodHandle {
        method
    }

    fn resolve_line(
        &self,
        _method: MethodHandle,
        _dex_pc: u32,
    ) -> Result<SourceLocation, ResolveError> {
        Ok(SourceLocation {
            file: None,
            line: 0,
        })
    }
}
