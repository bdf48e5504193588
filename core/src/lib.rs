pub mod capture;
pub mod descriptor;
pub mod errors;
pub mod resolver;
pub mod trace;
pub mod walker;

pub use capture::{CollectorOptions, SnapshotCollector};
pub use resolver::{LineResolver, NullResolver, SourceLocation};
pub use trace::{FrameRecord, FrameSequence, SourceKind};
pub use walker::{MethodHandle, ReplayWalker, StackWalker};

use errors::CaptureError;

/// Convenience function to capture one stack snapshot end-to-end.
pub fn capture_stack<W, R>(walker: &mut W, resolver: &R) -> Result<FrameSequence, CaptureError>
where
    W: StackWalker,
    R: LineResolver,
{
    SnapshotCollector::new(resolver).capture(walker)
}
