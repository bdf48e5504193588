use super::{FrameVisitor, MethodHandle, StackFrame, StackWalker};
use crate::errors::CaptureError;

/// Replays a recorded walk: one location descriptor per frame, innermost
/// first, with a distinct synthesized method handle per frame.
///
/// Lets the collector run against walker output captured on a device,
/// without a live runtime.
#[derive(Debug, Clone)]
pub struct ReplayWalker {
    descriptors: Vec<String>,
}

impl ReplayWalker {
    pub fn new(descriptors: Vec<String>) -> Self {
        Self { descriptors }
    }

    /// One descriptor per non-blank line.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl StackWalker for ReplayWalker {
    fn walk(&mut self, visitor: &mut dyn FrameVisitor) -> Result<(), CaptureError> {
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            let frame = ReplayFrame {
                descriptor,
                // Handles start at 1; replayed frames are never redirected
                // by translation, they just need distinct identities.
                method: MethodHandle(index as u64 + 1),
            };
            if !visitor.visit_frame(&frame)? {
                break;
            }
        }
        Ok(())
    }
}

struct ReplayFrame<'a> {
    descriptor: &'a str,
    method: MethodHandle,
}

impl StackFrame for ReplayFrame<'_> {
    fn describe_location(&self) -> String {
        self.descriptor.to_string()
    }

    fn method(&self) -> Option<MethodHandle> {
        Some(self.method)
    }
}
