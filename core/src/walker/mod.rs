//! Capability seam to the host runtime's stack-walking facility.
//!
//! The walker is host-controlled and injected; the core only depends on
//! these traits, so the parser and collector are testable against a fake
//! walker.

mod replay;

pub use replay::ReplayWalker;

use crate::errors::CaptureError;

/// Opaque identity of a method within the target runtime.
///
/// Equality is identity: method translation (see
/// [`LineResolver::translate_method`](crate::resolver::LineResolver::translate_method))
/// reports a redirected frame by returning a handle that compares unequal
/// to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodHandle(pub u64);

/// One frame as offered by the walker during a walk.
pub trait StackFrame {
    /// Textual location descriptor for this frame, in the shape
    /// [`descriptor::parse_location`](crate::descriptor::parse_location)
    /// understands.
    fn describe_location(&self) -> String;

    /// Handle of the method executing in this frame, if the walker knows
    /// it.
    fn method(&self) -> Option<MethodHandle>;
}

/// Callback driven by a [`StackWalker`], once per frame, innermost first.
pub trait FrameVisitor {
    /// Returns `Ok(true)` to keep walking, `Ok(false)` to stop early.
    fn visit_frame(&mut self, frame: &dyn StackFrame) -> Result<bool, CaptureError>;
}

/// The host runtime's stack-walking facility.
///
/// Implementations must offer frames innermost first, include inlined
/// frames when they can describe them, and end the walk at stack
/// exhaustion or an upcall boundary with no managed frames above it.
/// Visitor errors pass through unchanged; walker-side failures surface as
/// [`WalkError`](crate::errors::WalkError).
pub trait StackWalker {
    fn walk(&mut self, visitor: &mut dyn FrameVisitor) -> Result<(), CaptureError>;
}
